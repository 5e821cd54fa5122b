//! NASA POWER integration
//!
//! Client for the NASA POWER daily point API (<https://power.larc.nasa.gov>).
//! Returns historical daily values per parameter without requiring an API key.

pub mod client;
mod models;

pub use client::{DailyPointRequest, NasaPowerClient, PowerClient, PowerConfig, PowerError};
pub use models::{PowerSeries, parse_point_response};
