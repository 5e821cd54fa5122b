//! Historical daily series: the query that identifies it and the table it yields

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::value_objects::{GeoLocation, YearRange};
use crate::variables::DEFAULT_VARIABLES;

/// A point query against the historical data provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesQuery {
    pub location: GeoLocation,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Variable identifiers in request order
    pub variables: Vec<String>,
}

impl SeriesQuery {
    /// Query the default variable set for a whole-year range
    #[must_use]
    pub fn for_years(location: GeoLocation, years: YearRange) -> Self {
        Self {
            location,
            start: years.start_date(),
            end: years.end_date(),
            variables: DEFAULT_VARIABLES.iter().map(ToString::to_string).collect(),
        }
    }

    /// Replace the requested variables
    #[must_use]
    pub fn with_variables<I, S>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variables = variables.into_iter().map(Into::into).collect();
        self
    }

    /// Sorted, de-duplicated, comma-joined variable list
    ///
    /// Two queries naming the same variables in a different order share this value.
    #[must_use]
    pub fn canonical_variables(&self) -> String {
        self.variables
            .iter()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Date-ordered table of daily values per variable
///
/// Stored column-wise: every column holds exactly one cell per date, and a
/// missing observation is `None`, never zero. Dates are unique and increasing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeriesTable {
    dates: Vec<NaiveDate>,
    columns: BTreeMap<String, Vec<Option<f64>>>,
}

impl DailySeriesTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from per-variable `date -> value` maps
    ///
    /// The date axis is the union of all dates seen; a variable that has no
    /// entry for a date gets a missing cell there.
    #[must_use]
    pub fn from_variables(variables: BTreeMap<String, BTreeMap<NaiveDate, Option<f64>>>) -> Self {
        let dates: Vec<NaiveDate> = variables
            .values()
            .flat_map(BTreeMap::keys)
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let columns = variables
            .into_iter()
            .map(|(name, values)| {
                let cells = dates
                    .iter()
                    .map(|date| values.get(date).copied().flatten())
                    .collect();
                (name, cells)
            })
            .collect();

        Self { dates, columns }
    }

    /// True when the table has no dates or no variables
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.columns.is_empty()
    }

    /// Number of dates
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Value of `name` on `date`, `None` when either is unknown or the cell is missing
    #[must_use]
    pub fn value(&self, date: NaiveDate, name: &str) -> Option<f64> {
        let index = self.dates.binary_search(&date).ok()?;
        self.columns.get(name)?.get(index).copied().flatten()
    }

    /// Add `target = source * factor` when `source` exists; missing cells stay missing
    #[must_use]
    pub fn with_scaled_column(mut self, source: &str, target: &str, factor: f64) -> Self {
        if let Some(cells) = self.columns.get(source) {
            let scaled = cells.iter().map(|cell| cell.map(|v| v * factor)).collect();
            self.columns.insert(target.to_string(), scaled);
        }
        self
    }

    /// Arithmetic mean of the present cells of a column
    ///
    /// Returns `None` when the column is absent or has no present cell.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn column_mean(&self, name: &str) -> Option<f64> {
        let (sum, count) = self
            .columns
            .get(name)?
            .iter()
            .flatten()
            .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v, count + 1));
        (count > 0).then(|| sum / count as f64)
    }
}
