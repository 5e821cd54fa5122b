//! Banner and health check handlers

use application::ports::CacheStats;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Banner returned at `/`
pub const BANNER: &str = "Climate risk API is running";

/// Root response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// Banner - confirms the service is up
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: BANNER.to_string(),
    })
}

/// Counters for both caches
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CachesStatus {
    pub series: CacheStats,
    pub advisory: CacheStats,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub caches: CachesStatus,
}

/// Liveness check - is the server running?
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        caches: CachesStatus {
            series: state.series_cache.stats(),
            advisory: state.risk_service.advisory().cache().stats(),
        },
    })
}
