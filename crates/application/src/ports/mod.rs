//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod advisory_port;
mod cache_port;
mod series_port;

#[cfg(test)]
pub use advisory_port::MockAdvisoryGeneratorPort;
pub use advisory_port::{AdvisoryGeneratorPort, GenerationOutcome};
pub use cache_port::{CachePort, CachePortExt, CacheStats};
#[cfg(test)]
pub use series_port::MockHistoricalSeriesPort;
pub use series_port::HistoricalSeriesPort;
