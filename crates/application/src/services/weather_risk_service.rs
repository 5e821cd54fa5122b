//! Request orchestrator
//!
//! Sequences series fetch, statistics reduction and advisory generation for
//! one request, and maps failures onto the application error taxonomy.

use std::{fmt, sync::Arc};

use domain::{
    GeoLocation, SeriesQuery, StatsOutcome, SummaryRecord, YearRange, reduce,
    variables::DEFAULT_VARIABLES,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::advisory_service::AdvisoryService;
use crate::{error::ApplicationError, ports::HistoricalSeriesPort};

/// First year queried when the request names none
pub const DEFAULT_START_YEAR: i32 = 2015;

/// Last year queried when the request names none
pub const DEFAULT_END_YEAR: i32 = 2023;

const fn default_start_year() -> i32 {
    DEFAULT_START_YEAR
}

const fn default_end_year() -> i32 {
    DEFAULT_END_YEAR
}

/// A climate risk request for one point and year range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskRequest {
    pub lat: f64,
    pub lon: f64,
    #[serde(default = "default_start_year")]
    pub start_year: i32,
    #[serde(default = "default_end_year")]
    pub end_year: i32,
}

impl RiskRequest {
    /// Request with the default year range
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
        }
    }

    /// Replace the year range
    #[must_use]
    pub const fn with_years(mut self, start_year: i32, end_year: i32) -> Self {
        self.start_year = start_year;
        self.end_year = end_year;
        self
    }
}

/// Summary record with the advisory merged in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisedSummary {
    #[serde(flatten)]
    pub summary: SummaryRecord,
    pub advisory: String,
}

/// Response for one request: echoed inputs plus the advised summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub location: GeoLocation,
    /// First day, `YYYYMMDD`
    pub start: String,
    /// Last day, `YYYYMMDD`
    pub end: String,
    pub result: AdvisedSummary,
}

/// Orchestrates series fetch, reduction and advisory
pub struct WeatherRiskService {
    series: Arc<dyn HistoricalSeriesPort>,
    advisory: Arc<AdvisoryService>,
    variables: Vec<String>,
}

impl fmt::Debug for WeatherRiskService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherRiskService")
            .field("advisory", &self.advisory)
            .field("variables", &self.variables)
            .finish_non_exhaustive()
    }
}

impl WeatherRiskService {
    /// Create a new orchestrator
    pub fn new(series: Arc<dyn HistoricalSeriesPort>, advisory: Arc<AdvisoryService>) -> Self {
        Self {
            series,
            advisory,
            variables: DEFAULT_VARIABLES.iter().map(ToString::to_string).collect(),
        }
    }

    /// Request a different variable set from the provider
    ///
    /// An empty list keeps the defaults.
    #[must_use]
    pub fn with_variables(mut self, variables: Vec<String>) -> Self {
        if !variables.is_empty() {
            self.variables = variables;
        }
        self
    }

    /// The advisory engine
    pub fn advisory(&self) -> &AdvisoryService {
        &self.advisory
    }

    /// Handle one request
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` for out-of-range coordinates or years
    /// - `Upstream` when the data provider fails
    /// - `NotFound` when the provider returns no rows
    #[instrument(skip(self), fields(lat = request.lat, lon = request.lon))]
    pub async fn handle(&self, request: RiskRequest) -> Result<RiskReport, ApplicationError> {
        let location = GeoLocation::new(request.lat, request.lon)
            .map_err(|e| ApplicationError::InvalidRequest(e.to_string()))?;
        let years = YearRange::new(request.start_year, request.end_year)
            .map_err(|e| ApplicationError::InvalidRequest(e.to_string()))?;

        let query = SeriesQuery::for_years(location, years).with_variables(self.variables.clone());
        let table = self.series.fetch(&query).await.inspect_err(|e| {
            warn!(error = %e, "Historical series fetch failed");
        })?;

        debug!(rows = table.len(), "Fetched historical series");

        let summary = match reduce(Some(&table)) {
            StatsOutcome::Summary(summary) => summary,
            StatsOutcome::NoData => {
                return Err(ApplicationError::NotFound(
                    "No data returned for the requested location and years".to_string(),
                ));
            },
        };

        let advisory = self.advisory.advise(&summary).await;

        info!(
            comfort_index = ?summary.comfort_index,
            "Climate risk report ready"
        );

        Ok(RiskReport {
            location,
            start: years.start_token(),
            end: years.end_token(),
            result: AdvisedSummary { summary, advisory },
        })
    }
}
