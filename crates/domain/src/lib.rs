//! Domain layer for the climate risk advisor
//!
//! Contains the climate series model, the summary statistics reducer and the
//! comfort index. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod stats;
pub mod value_objects;
pub mod variables;

pub use entities::*;
pub use errors::DomainError;
pub use stats::{StatsOutcome, comfort_index, reduce, round2};
pub use value_objects::*;
