//! Application configuration
//!
//! Loaded from an optional `config.toml` and `CLIMATE_RISK__*` environment
//! variables. The short deployment variables `USE_GENAI`, `GOOGLE_API_KEY` and
//! `GENAI_TIMEOUT` are applied last.

mod advisory;
mod cache;
mod power;
mod server;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

pub use advisory::AdvisoryAppConfig;
pub use cache::CacheConfig;
pub use power::PowerAppConfig;
pub use server::ServerConfig;

/// Prefix of structured environment overrides, e.g. `CLIMATE_RISK__SERVER__PORT`
pub const ENV_PREFIX: &str = "CLIMATE_RISK";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Historical data provider configuration
    #[serde(default)]
    pub power: PowerAppConfig,

    /// Advisory generator configuration
    #[serde(default)]
    pub advisory: AdvisoryAppConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., CLIMATE_RISK__SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .with_list_parse_key("power.parameters")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_legacy_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Apply `USE_GENAI`, `GOOGLE_API_KEY` and `GENAI_TIMEOUT` via `lookup`
    pub fn apply_legacy_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(flag) = lookup("USE_GENAI") {
            self.advisory.enabled = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
        }

        if let Some(key) = lookup("GOOGLE_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.advisory.api_key = Some(SecretString::from(key));
        }

        if let Some(raw) = lookup("GENAI_TIMEOUT") {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.advisory.timeout_secs = secs,
                Err(_) => tracing::warn!(
                    value = %raw,
                    kept = self.advisory.timeout_secs,
                    "Ignoring invalid GENAI_TIMEOUT"
                ),
            }
        }
    }
}
