//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request parameters failed validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Historical data provider failed
    #[error("Upstream data service error: {0}")]
    Upstream(String),

    /// Provider answered but the result set was empty
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }

    /// True for errors caused by the caller's input
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Domain(_) | Self::InvalidRequest(_))
    }
}
