//! Historical series port
//!
//! Defines the interface for retrieving daily climate observations.

use async_trait::async_trait;
use domain::{DailySeriesTable, SeriesQuery};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for historical daily series retrieval
///
/// Implementations return a normalized table; a well-formed but empty
/// result is `Ok` with an empty table, not an error.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HistoricalSeriesPort: Send + Sync {
    /// Fetch the daily series for a query
    async fn fetch(&self, query: &SeriesQuery) -> Result<DailySeriesTable, ApplicationError>;
}
