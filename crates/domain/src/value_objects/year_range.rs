//! Inclusive range of calendar years

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Date format used by the historical data provider (`YYYYMMDD`)
pub const COMPACT_DATE_FORMAT: &str = "%Y%m%d";

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Inclusive year range, from January 1 of `start_year` to December 31 of `end_year`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    start_year: i32,
    end_year: i32,
}

impl YearRange {
    /// Create a validated year range
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidYearRange` when a year does not fit in four
    /// digits or when `start_year` is after `end_year`.
    pub fn new(start_year: i32, end_year: i32) -> Result<Self, DomainError> {
        for year in [start_year, end_year] {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(DomainError::invalid_year_range(format!(
                    "year {year} must be between {MIN_YEAR} and {MAX_YEAR}"
                )));
            }
        }
        if start_year > end_year {
            return Err(DomainError::invalid_year_range(format!(
                "start year {start_year} is after end year {end_year}"
            )));
        }
        Ok(Self {
            start_year,
            end_year,
        })
    }

    #[must_use]
    pub const fn start_year(&self) -> i32 {
        self.start_year
    }

    #[must_use]
    pub const fn end_year(&self) -> i32 {
        self.end_year
    }

    /// January 1 of the start year
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.start_year, 1, 1).unwrap_or(NaiveDate::MIN)
    }

    /// December 31 of the end year
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.end_year, 12, 31).unwrap_or(NaiveDate::MAX)
    }

    /// Start date in the provider's fixed-width format, e.g. `20150101`
    #[must_use]
    pub fn start_token(&self) -> String {
        self.start_date().format(COMPACT_DATE_FORMAT).to_string()
    }

    /// End date in the provider's fixed-width format, e.g. `20231231`
    #[must_use]
    pub fn end_token(&self) -> String {
        self.end_date().format(COMPACT_DATE_FORMAT).to_string()
    }
}
