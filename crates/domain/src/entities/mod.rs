//! Domain entities

mod series;
mod summary;

pub use series::{DailySeriesTable, SeriesQuery};
pub use summary::SummaryRecord;
