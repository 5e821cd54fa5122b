//! Configuration for the generation client

use serde::{Deserialize, Serialize};

/// Configuration for the generation backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Base URL of the generation API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used when a request does not name one
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum output tokens per response
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Sampling temperature (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// HTTP timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

const fn default_max_output_tokens() -> u32 {
    150
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            timeout_ms: default_timeout_ms(),
        }
    }
}
