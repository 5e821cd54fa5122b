//! Advisory generator configuration.

use std::time::Duration;

use ai_core::GenerationConfig;
use application::AdvisoryConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// External advisory generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryAppConfig {
    /// Use the external generator at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// API key (sensitive - uses `SecretString`); absent forces the fallback
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Generation API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Output token budget
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// How long a request waits for the generator, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// HTTP timeout of the generation call itself, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Concurrent external calls
    #[serde(default = "default_worker_pool_size")]
    pub worker_pool_size: usize,
}

const fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    GenerationConfig::default().base_url
}

fn default_model() -> String {
    GenerationConfig::default().model
}

const fn default_max_output_tokens() -> u32 {
    150
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_worker_pool_size() -> usize {
    3
}

impl Default for AdvisoryAppConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            worker_pool_size: default_worker_pool_size(),
        }
    }
}

impl AdvisoryAppConfig {
    /// Client configuration for `ai_core`
    #[must_use]
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            max_output_tokens: self.max_output_tokens,
            temperature: self.temperature,
            timeout_ms: self.request_timeout_secs.saturating_mul(1000),
        }
    }

    /// Engine tuning for `application`
    #[must_use]
    pub const fn engine_config(&self, cache_ttl: Duration) -> AdvisoryConfig {
        AdvisoryConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            worker_pool_size: self.worker_pool_size,
            cache_ttl,
        }
    }
}
