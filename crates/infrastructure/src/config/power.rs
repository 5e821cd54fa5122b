//! Historical data provider configuration.

use domain::variables::DEFAULT_VARIABLES;
use integration_power::PowerConfig;
use serde::{Deserialize, Serialize};

/// NASA POWER configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerAppConfig {
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Provider user community
    #[serde(default = "default_community")]
    pub community: String,

    /// Variables requested for every query
    #[serde(default = "default_parameters")]
    pub parameters: Vec<String>,
}

fn default_base_url() -> String {
    PowerConfig::default().base_url
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_community() -> String {
    "AG".to_string()
}

fn default_parameters() -> Vec<String> {
    DEFAULT_VARIABLES.iter().map(ToString::to_string).collect()
}

impl Default for PowerAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            community: default_community(),
            parameters: default_parameters(),
        }
    }
}

impl PowerAppConfig {
    /// Client configuration for `integration_power`
    #[must_use]
    pub fn client_config(&self) -> PowerConfig {
        PowerConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            community: self.community.clone(),
        }
    }
}
