//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod year_range;

pub use geo_location::GeoLocation;
pub use year_range::YearRange;
