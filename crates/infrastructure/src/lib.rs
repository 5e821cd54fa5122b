//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the NASA POWER series
//! adapter and its cache, the Gemini advisory adapter, the Moka caches,
//! configuration loading and tracing setup.

pub mod adapters;
pub mod cache;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use cache::{MokaCache, MokaCacheConfig, generate_cache_key, series_cache_key};
pub use config::{AdvisoryAppConfig, AppConfig, CacheConfig, PowerAppConfig, ServerConfig};
pub use telemetry::{LogFormat, init_tracing};
