//! Series adapter - Implements HistoricalSeriesPort using integration_power

use application::{error::ApplicationError, ports::HistoricalSeriesPort};
use async_trait::async_trait;
use domain::{
    DailySeriesTable, SeriesQuery,
    variables::{MS_TO_KMH, WS2M, WS2M_KMH},
};
use integration_power::{DailyPointRequest, NasaPowerClient, PowerClient, PowerConfig, PowerError};
use tracing::{debug, instrument};

/// Adapter for historical series using the NASA POWER API
pub struct PowerSeriesAdapter {
    client: NasaPowerClient,
}

impl std::fmt::Debug for PowerSeriesAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PowerSeriesAdapter")
            .field("client", &self.client)
            .finish()
    }
}

impl PowerSeriesAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(PowerConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: PowerConfig) -> Result<Self, ApplicationError> {
        let client =
            NasaPowerClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration error to application error
    fn map_error(err: PowerError) -> ApplicationError {
        match err {
            PowerError::InvalidCoordinates => ApplicationError::InvalidRequest(err.to_string()),
            PowerError::ConnectionFailed(_)
            | PowerError::RequestFailed(_)
            | PowerError::ParseError(_)
            | PowerError::UnexpectedShape(_)
            | PowerError::ServiceUnavailable(_)
            | PowerError::RateLimitExceeded => ApplicationError::Upstream(err.to_string()),
        }
    }

    fn to_request(query: &SeriesQuery) -> DailyPointRequest {
        DailyPointRequest {
            latitude: query.location.latitude(),
            longitude: query.location.longitude(),
            start: query.start,
            end: query.end,
            parameters: query.variables.clone(),
        }
    }
}

#[async_trait]
impl HistoricalSeriesPort for PowerSeriesAdapter {
    #[instrument(skip(self, query), fields(location = %query.location, start = %query.start, end = %query.end))]
    async fn fetch(&self, query: &SeriesQuery) -> Result<DailySeriesTable, ApplicationError> {
        let series = self
            .client
            .fetch_daily(&Self::to_request(query))
            .await
            .map_err(Self::map_error)?;

        let table = series.into_table().with_scaled_column(WS2M, WS2M_KMH, MS_TO_KMH);
        debug!(rows = table.len(), "Normalized daily series");
        Ok(table)
    }
}
