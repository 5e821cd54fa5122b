//! Climate risk HTTP presentation layer
//!
//! This crate provides the HTTP API for the climate risk advisor.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod shutdown;
pub mod state;

pub use error::ApiError;
pub use middleware::{ValidatedJson, ValidationError};
pub use routes::create_router;
pub use state::AppState;
