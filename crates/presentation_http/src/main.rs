//! Climate risk HTTP server
//!
//! Main entry point for the HTTP API server.

use std::{future::IntoFuture, time::Duration};

use axum::http::{HeaderValue, Method};
use infrastructure::{AppConfig, LogFormat, init_tracing, telemetry::DEFAULT_FILTER};
use presentation_http::{
    routes,
    shutdown::{serve_until_drained, shutdown_signal, signal_pair},
    state::AppState,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Request bodies are tiny JSON objects
const MAX_BODY_BYTES: usize = 16 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before tracing so the log format applies
    let config = AppConfig::load();
    let log_format = config
        .as_ref()
        .ok()
        .and_then(|c| c.server.log_format.parse::<LogFormat>().ok())
        .unwrap_or_default();
    init_tracing(log_format, DEFAULT_FILTER)?;

    info!("Climate risk server v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = config.unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    info!(
        host = %config.server.host,
        port = %config.server.port,
        power = %config.power.base_url,
        genai_enabled = config.advisory.enabled,
        model = %config.advisory.model,
        "Configuration loaded"
    );

    let state = AppState::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize services: {e}"))?;

    let app = routes::create_router(state);

    let cors_layer = if config.server.allowed_origins.is_empty() {
        // Development mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    };

    // First added = innermost
    let app = app
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    let (trigger, signalled) = signal_pair(shutdown_signal());
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(trigger)
        .into_future();

    if serve_until_drained(server, signalled, shutdown_timeout).await? {
        info!("Server shutdown complete");
    }
    Ok(())
}
