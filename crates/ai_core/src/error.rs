//! Generation errors

use thiserror::Error;

/// Errors that can occur while calling the generation backend
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Failed to connect to the generation service
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the generation service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response parsing failed or carried no text
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout at the HTTP layer
    #[error("Generation timeout after {0}ms")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),
}

impl From<reqwest::Error> for GenerationError {
    /// The request URL is dropped from the message
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            Self::Timeout(0)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
