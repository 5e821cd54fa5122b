//! Cache port definition
//!
//! Defines the interface for the short-lived caches in front of the
//! historical data provider and the advisory generator.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Cache port for storing and retrieving cached values
///
/// Implementations must be safe under concurrent access. There is no
/// per-key locking: two concurrent misses may both write, last write wins.
/// Values are stored as raw bytes - callers handle serialization.
#[async_trait]
pub trait CachePort: Send + Sync + std::fmt::Debug {
    /// Get a cached value by key
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, ApplicationError>;

    /// Set a cached value with a time-to-live
    ///
    /// If the key already exists, its value and TTL are replaced.
    async fn set_bytes(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), ApplicationError>;

    /// Get cache statistics (hits, misses, size)
    fn stats(&self) -> CacheStats;
}

/// Extension trait for typed cache operations
///
/// Provides typed get/set on top of the raw byte interface.
#[async_trait]
pub trait CachePortExt: CachePort {
    /// Get a typed value from cache
    async fn get<T>(&self, key: &str) -> Result<Option<T>, ApplicationError>
    where
        T: serde::de::DeserializeOwned + Send,
    {
        match self.get_bytes(key).await? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes).map_err(|e| {
                    ApplicationError::Internal(format!("Cache deserialization error: {e}"))
                })?;
                Ok(Some(value))
            },
            None => Ok(None),
        }
    }

    /// Set a typed value in cache
    async fn set<T>(&self, key: &str, value: &T, ttl: Duration) -> Result<(), ApplicationError>
    where
        T: serde::Serialize + Send + Sync,
    {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| ApplicationError::Internal(format!("Cache serialization error: {e}")))?;
        self.set_bytes(key, bytes, ttl).await
    }
}

impl<T: CachePort + ?Sized> CachePortExt for T {}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Current number of entries (approximate, expiry is lazy)
    pub entries: u64,
}

impl CacheStats {
    /// Calculate the hit rate as a fraction (0.0 - 1.0)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
