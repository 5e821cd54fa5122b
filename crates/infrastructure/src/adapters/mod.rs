//! Adapters implementing application ports

mod cached_series_adapter;
mod gemini_advisory_adapter;
mod power_series_adapter;

pub use cached_series_adapter::CachedSeriesAdapter;
pub use gemini_advisory_adapter::GeminiAdvisoryAdapter;
pub use power_series_adapter::PowerSeriesAdapter;
