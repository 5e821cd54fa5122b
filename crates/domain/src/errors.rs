//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates outside the valid latitude/longitude range
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Year range that cannot be turned into a provider date range
    #[error("Invalid year range: {0}")]
    InvalidYearRange(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an invalid year range error
    pub fn invalid_year_range(reason: impl Into<String>) -> Self {
        Self::InvalidYearRange(reason.into())
    }
}
