//! Cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Capacity and lifetime of the two in-memory caches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry lifetime in seconds, shared by both caches (default: 1 hour)
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Maximum distinct series queries kept
    #[serde(default = "default_series_max_entries")]
    pub series_max_entries: u64,

    /// Maximum advisories kept
    #[serde(default = "default_advisory_max_entries")]
    pub advisory_max_entries: u64,
}

const fn default_ttl_secs() -> u64 {
    60 * 60
}

const fn default_series_max_entries() -> u64 {
    256
}

const fn default_advisory_max_entries() -> u64 {
    1024
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            series_max_entries: default_series_max_entries(),
            advisory_max_entries: default_advisory_max_entries(),
        }
    }
}

impl CacheConfig {
    /// Entry lifetime
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}
