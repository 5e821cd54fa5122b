//! API error handling
//!
//! Every failure renders as `{error, code, details?}`. Internal errors keep
//! their cause in the log and out of the response body.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// HTTP status for this error
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::BadRequest(msg) => ErrorResponse {
                error: "Invalid request".to_string(),
                code: "bad_request".to_string(),
                details: Some(msg),
            },
            Self::NotFound(msg) => ErrorResponse {
                error: msg,
                code: "not_found".to_string(),
                details: None,
            },
            Self::Upstream(msg) => ErrorResponse {
                error: "Failed to fetch data from NASA POWER".to_string(),
                code: "upstream_error".to_string(),
                details: Some(msg),
            },
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                ErrorResponse {
                    error: "An internal error occurred".to_string(),
                    code: "internal_error".to_string(),
                    details: None,
                }
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::InvalidRequest(msg) => Self::BadRequest(msg),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::Upstream(msg) => Self::Upstream(msg),
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn api_error_messages() {
        assert_eq!(
            ApiError::BadRequest("invalid input".to_string()).to_string(),
            "Bad request: invalid input"
        );
        assert_eq!(
            ApiError::Upstream("HTTP 503".to_string()).to_string(),
            "Upstream error: HTTP 503"
        );
    }

    #[test]
    fn error_response_omits_missing_details() {
        let resp = ErrorResponse {
            error: "No data".to_string(),
            code: "not_found".to_string(),
            details: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("details"));
    }

    #[tokio::test]
    async fn not_found_renders_404() {
        let (status, body) =
            body_of(ApiError::NotFound("No data returned for this location".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
        assert_eq!(body["error"], "No data returned for this location");
    }

    #[tokio::test]
    async fn upstream_renders_500_with_details() {
        let (status, body) = body_of(ApiError::Upstream("HTTP 503".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "upstream_error");
        assert_eq!(body["details"], "HTTP 503");
    }

    #[tokio::test]
    async fn internal_hides_cause() {
        let (status, body) = body_of(ApiError::Internal("secret path".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.get("details").is_none());
        assert!(!body.to_string().contains("secret path"));
    }

    #[test]
    fn application_errors_convert() {
        let cases = [
            (
                ApplicationError::Domain(domain::DomainError::InvalidCoordinates),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApplicationError::InvalidRequest("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApplicationError::NotFound("none".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                ApplicationError::Upstream("down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApplicationError::Configuration("bad".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (source, status) in cases {
            assert_eq!(ApiError::from(source).status(), status);
        }
    }
}
