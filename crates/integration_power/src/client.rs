//! NASA POWER client
//!
//! HTTP client for the NASA POWER daily point API.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{PowerSeries, parse_point_response};

/// Date format for the `start`/`end` query parameters
const QUERY_DATE_FORMAT: &str = "%Y%m%d";

/// NASA POWER client errors
#[derive(Debug, Error)]
pub enum PowerError {
    /// Connection to the data service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the data service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to decode the response body
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Response decoded but has no recognizable parameter map
    #[error("Unexpected NASA POWER response structure: {0}")]
    UnexpectedShape(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// NASA POWER service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerConfig {
    /// API base URL (default: <https://power.larc.nasa.gov/api>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User community, selects units and parameter set (default: AG)
    #[serde(default = "default_community")]
    pub community: String,
}

fn default_base_url() -> String {
    "https://power.larc.nasa.gov/api".to_string()
}

const fn default_timeout() -> u64 {
    30
}

fn default_community() -> String {
    "AG".to_string()
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            community: default_community(),
        }
    }
}

/// A daily point query
#[derive(Debug, Clone, PartialEq)]
pub struct DailyPointRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub parameters: Vec<String>,
}

/// Client trait for fetching historical daily data
#[async_trait]
pub trait PowerClient: Send + Sync {
    /// Fetch daily values for a point and date range
    async fn fetch_daily(&self, request: &DailyPointRequest) -> Result<PowerSeries, PowerError>;
}

/// NASA POWER HTTP client implementation
#[derive(Debug)]
pub struct NasaPowerClient {
    client: Client,
    config: PowerConfig,
}

impl NasaPowerClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: PowerConfig) -> Result<Self, PowerError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PowerError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, PowerError> {
        Self::new(PowerConfig::default())
    }

    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), PowerError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(PowerError::InvalidCoordinates);
        }
        Ok(())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/temporal/daily/point",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Query string pairs in the order the API documents them
    fn query_pairs(&self, request: &DailyPointRequest) -> Vec<(&'static str, String)> {
        vec![
            ("start", request.start.format(QUERY_DATE_FORMAT).to_string()),
            ("end", request.end.format(QUERY_DATE_FORMAT).to_string()),
            ("latitude", request.latitude.to_string()),
            ("longitude", request.longitude.to_string()),
            ("community", self.config.community.clone()),
            ("parameters", request.parameters.join(",")),
            ("format", "JSON".to_string()),
        ]
    }
}

#[async_trait]
impl PowerClient for NasaPowerClient {
    #[instrument(skip(self, request), fields(lat = %request.latitude, lon = %request.longitude, start = %request.start, end = %request.end))]
    async fn fetch_daily(&self, request: &DailyPointRequest) -> Result<PowerSeries, PowerError> {
        Self::validate_coordinates(request.latitude, request.longitude)?;

        let url = self.endpoint();
        debug!(url = %url, parameters = ?request.parameters, "Fetching daily point data");

        let response = self
            .client
            .get(&url)
            .query(&self.query_pairs(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    PowerError::ConnectionFailed(e.to_string())
                } else {
                    PowerError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PowerError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(PowerError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(PowerError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PowerError::RequestFailed(e.to_string()))?;

        let series = parse_point_response(&body)?;
        debug!(parameters = series.parameters.len(), "Parsed daily point data");
        Ok(series)
    }
}
