//! Moka in-memory cache implementation
//!
//! Thread-safe, bounded in-memory cache with a cache-wide TTL.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use application::{
    error::ApplicationError,
    ports::{CachePort, CacheStats},
};
use async_trait::async_trait;
use moka::future::Cache;
use tracing::{debug, instrument};

/// Configuration for Moka cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MokaCacheConfig {
    /// Maximum number of entries
    pub max_entries: u64,
    /// Lifetime of every entry, counted from insertion
    pub ttl: Duration,
}

impl Default for MokaCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 256,
            ttl: Duration::from_secs(3600), // 1 hour
        }
    }
}

/// Moka-based in-memory cache
///
/// Expired entries are dropped lazily. When full, Moka's admission policy
/// picks the victim.
///
/// Note: Moka 0.12 uses a global TTL configured at build time. The `ttl`
/// passed to `set_bytes` is ignored in favour of the cache-level one.
pub struct MokaCache {
    cache: Cache<String, Vec<u8>>,
    config: MokaCacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for MokaCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCache")
            .field("entries", &self.cache.entry_count())
            .field("max_entries", &self.config.max_entries)
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

impl MokaCache {
    /// Create a new Moka cache with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MokaCacheConfig::default())
    }

    /// Create a new Moka cache with custom configuration
    #[must_use]
    pub fn with_config(config: MokaCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();

        Self {
            cache,
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Cache for raw series fetches
    #[must_use]
    pub fn for_series(max_entries: u64, ttl: Duration) -> Self {
        Self::with_config(MokaCacheConfig { max_entries, ttl })
    }

    /// Cache for advisory texts
    #[must_use]
    pub fn for_advisories(max_entries: u64, ttl: Duration) -> Self {
        Self::with_config(MokaCacheConfig { max_entries, ttl })
    }

    /// Configuration this cache was built with
    #[must_use]
    pub const fn config(&self) -> MokaCacheConfig {
        self.config
    }

    /// Flush pending evictions and expirations
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }
}

impl Default for MokaCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CachePort for MokaCache {
    #[instrument(skip(self), level = "debug")]
    #[allow(clippy::option_if_let_else)]
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, ApplicationError> {
        if let Some(bytes) = self.cache.get(key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "Cache hit");
            Ok(Some(bytes))
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "Cache miss");
            Ok(None)
        }
    }

    #[instrument(skip(self, value), level = "debug")]
    async fn set_bytes(
        &self,
        key: &str,
        value: Vec<u8>,
        _ttl: Duration,
    ) -> Result<(), ApplicationError> {
        self.cache.insert(key.to_string(), value).await;
        debug!(key = %key, "Cache set");
        Ok(())
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.entry_count(),
        }
    }
}
