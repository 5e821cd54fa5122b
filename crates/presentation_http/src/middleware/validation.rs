//! Request validation
//!
//! Provides a `ValidatedJson` extractor that validates request bodies using the validator crate.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::error::ErrorResponse;

/// Validation error type
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] JsonRejection),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let (error, details) = match &self {
            Self::JsonError(e) => ("Invalid request body".to_string(), e.body_text()),
            Self::ValidationFailed(msg) => ("Validation failed".to_string(), msg.clone()),
        };

        let body = ErrorResponse {
            error,
            code: "bad_request".to_string(),
            details: Some(details),
        };

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Flatten field errors into `field: message` pairs, sorted by field
fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                format!(
                    "{}: {}",
                    field,
                    error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string)
                )
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

/// A JSON extractor that also validates the request body
///
/// Malformed JSON, missing fields and failed rules all reject with 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        value
            .validate()
            .map_err(|e| ValidationError::ValidationFailed(describe(&e)))?;

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, routing::post};
    use serde::Deserialize;
    use tower::ServiceExt;
    use validator::Validate;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct PointRequest {
        #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
        lat: f64,
        #[validate(range(min = 0, max = 10, message = "must be between 0 and 10"))]
        #[serde(default)]
        count: u32,
    }

    async fn test_handler(ValidatedJson(req): ValidatedJson<PointRequest>) -> String {
        req.lat.to_string()
    }

    fn create_test_app() -> Router {
        Router::new().route("/test", post(test_handler))
    }

    async fn post_body(body: &'static str) -> Response {
        create_test_app()
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/test")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn valid_request_passes() {
        let response = post_body(r#"{"lat": 12.5}"#).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn out_of_range_rejected() {
        let response = post_body(r#"{"lat": 91.0}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn count_out_of_range_rejected() {
        let response = post_body(r#"{"lat": 1.0, "count": 100}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_field_rejected() {
        let response = post_body(r#"{"count": 1}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_json_rejected() {
        let response = post_body(r#"{"lat": not valid json}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn describe_sorts_fields() {
        let request = PointRequest {
            lat: 100.0,
            count: 50,
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            describe(&errors),
            "count: must be between 0 and 10; lat: must be between -90 and 90"
        );
    }

    #[test]
    fn validation_error_debug() {
        let error = ValidationError::ValidationFailed("test".to_string());
        let debug = format!("{error:?}");
        assert!(debug.contains("ValidationFailed"));
    }
}
