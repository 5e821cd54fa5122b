//! NASA POWER response models
//!
//! The daily point endpoint answers either with a single GeoJSON feature
//! (`properties.parameter`) or with a feature collection whose first feature
//! carries the same structure. Anything else is a contract violation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use domain::DailySeriesTable;
use serde::Deserialize;

use crate::client::PowerError;

/// Fill value NASA POWER uses for missing observations
pub const DEFAULT_FILL_VALUE: f64 = -999.0;

/// Date key format inside the parameter map
const DATE_KEY_FORMAT: &str = "%Y%m%d";

/// Parameter name -> raw date key -> value
type RawParameters = BTreeMap<String, BTreeMap<String, Option<f64>>>;

/// Raw API response
#[derive(Debug, Clone, Deserialize)]
struct PointResponse {
    #[serde(default)]
    header: Option<Header>,
    #[serde(default)]
    properties: Option<Properties>,
    #[serde(default)]
    features: Option<Vec<Feature>>,
}

#[derive(Debug, Clone, Deserialize)]
struct Header {
    #[serde(default)]
    fill_value: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct Properties {
    #[serde(default)]
    parameter: Option<RawParameters>,
}

#[derive(Debug, Clone, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Properties>,
}

/// Daily values per parameter, with fill values already turned into gaps
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerSeries {
    pub parameters: BTreeMap<String, BTreeMap<NaiveDate, Option<f64>>>,
}

impl PowerSeries {
    /// True when no parameter has any date
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.values().all(BTreeMap::is_empty)
    }

    /// Convert into the domain's date-ordered table
    #[must_use]
    pub fn into_table(self) -> DailySeriesTable {
        DailySeriesTable::from_variables(self.parameters)
    }
}

impl PointResponse {
    /// Locate the parameter map, top-level properties first
    fn into_parameters(self) -> Result<(RawParameters, Option<f64>), PowerError> {
        let fill_value = self.header.and_then(|h| h.fill_value);

        if let Some(parameters) = self.properties.and_then(|p| p.parameter) {
            return Ok((parameters, fill_value));
        }

        let first_feature = self
            .features
            .and_then(|features| features.into_iter().next())
            .ok_or_else(|| {
                PowerError::UnexpectedShape(
                    "neither properties.parameter nor a non-empty features list".to_string(),
                )
            })?;

        first_feature
            .properties
            .and_then(|p| p.parameter)
            .map(|parameters| (parameters, fill_value))
            .ok_or_else(|| {
                PowerError::UnexpectedShape("features[0] has no properties.parameter".to_string())
            })
    }
}

fn is_fill(value: f64, fill_value: f64) -> bool {
    (value - fill_value).abs() < f64::EPSILON
}

/// Parse a raw NASA POWER JSON body into a `PowerSeries`
///
/// # Errors
///
/// Returns `PowerError::ParseError` for malformed JSON or date keys and
/// `PowerError::UnexpectedShape` when no parameter map can be located.
pub fn parse_point_response(body: &[u8]) -> Result<PowerSeries, PowerError> {
    let response: PointResponse =
        serde_json::from_slice(body).map_err(|e| PowerError::ParseError(e.to_string()))?;

    let (raw, fill_value) = response.into_parameters()?;
    let fill_value = fill_value.unwrap_or(DEFAULT_FILL_VALUE);

    let mut parameters = BTreeMap::new();
    for (name, values) in raw {
        let mut series = BTreeMap::new();
        for (key, value) in values {
            let date = NaiveDate::parse_from_str(&key, DATE_KEY_FORMAT).map_err(|e| {
                PowerError::ParseError(format!("Invalid date key '{key}' for {name}: {e}"))
            })?;
            series.insert(date, value.filter(|v| !is_fill(*v, fill_value)));
        }
        parameters.insert(name, series);
    }

    Ok(PowerSeries { parameters })
}
