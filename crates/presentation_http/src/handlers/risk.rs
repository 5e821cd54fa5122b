//! Climate risk handler

use std::borrow::Cow;

use application::{DEFAULT_END_YEAR, DEFAULT_START_YEAR, RiskReport, RiskRequest};
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Body of `POST /api/weather_risk`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_year_order"))]
pub struct WeatherRiskBody {
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub lon: f64,

    #[serde(default = "default_start_year")]
    #[validate(range(min = 1, max = 9999, message = "must be between 1 and 9999"))]
    pub start_year: i32,

    #[serde(default = "default_end_year")]
    #[validate(range(min = 1, max = 9999, message = "must be between 1 and 9999"))]
    pub end_year: i32,
}

const fn default_start_year() -> i32 {
    DEFAULT_START_YEAR
}

const fn default_end_year() -> i32 {
    DEFAULT_END_YEAR
}

fn validate_year_order(body: &WeatherRiskBody) -> Result<(), validator::ValidationError> {
    if body.start_year > body.end_year {
        let mut err = validator::ValidationError::new("year_order");
        err.message = Some(Cow::Borrowed("start_year must not be after end_year"));
        return Err(err);
    }
    Ok(())
}

impl From<WeatherRiskBody> for RiskRequest {
    fn from(body: WeatherRiskBody) -> Self {
        Self::new(body.lat, body.lon).with_years(body.start_year, body.end_year)
    }
}

/// Summary statistics and advisory for a point and year range
#[instrument(skip(state, body), fields(lat = body.lat, lon = body.lon))]
pub async fn weather_risk(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<WeatherRiskBody>,
) -> Result<Json<RiskReport>, ApiError> {
    let report = state.risk_service.handle(body.into()).await?;
    Ok(Json(report))
}
