//! Cache implementations
//!
//! `MokaCache` backs both the series cache and the advisory cache; each is
//! its own instance with its own capacity.

mod moka_cache;

use domain::SeriesQuery;

pub use moka_cache::{MokaCache, MokaCacheConfig};

/// Generate a cache key from components using blake3 hash
#[must_use]
pub fn generate_cache_key(prefix: &str, components: &[&str]) -> String {
    let mut hasher = blake3::Hasher::new();
    for component in components {
        hasher.update(component.as_bytes());
        hasher.update(b"|"); // Separator to avoid collisions
    }
    let hash = hasher.finalize();
    format!("{}:{}", prefix, hash.to_hex())
}

/// Cache key for a series query
///
/// Exact coordinates, both dates and the canonical variable list, so the
/// same variables in a different order share an entry.
#[must_use]
pub fn series_cache_key(query: &SeriesQuery) -> String {
    let latitude = query.location.latitude().to_string();
    let longitude = query.location.longitude().to_string();
    let start = query.start.to_string();
    let end = query.end.to_string();
    let variables = query.canonical_variables();
    generate_cache_key(
        "series",
        &[&latitude, &longitude, &start, &end, &variables],
    )
}
