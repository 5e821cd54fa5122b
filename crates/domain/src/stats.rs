//! Summary statistics reducer and comfort index
//!
//! Each metric is an ordered list of candidate extractors evaluated until one
//! yields a value. All outputs are rounded to two decimals.

use crate::entities::{DailySeriesTable, SummaryRecord};
use crate::variables::{MS_TO_KMH, PRECTOTCORR, RH2M, T2M, T2M_MAX, WS2M, WS2M_KMH};

/// Ideal temperature in °C
const IDEAL_TEMP_C: f64 = 25.0;
/// Deviation from the ideal at which the temperature score reaches zero
const TEMP_TOLERANCE_C: f64 = 30.0;
const HUMIDITY_SCALE_PCT: f64 = 100.0;
const WIND_SCALE_KMH: f64 = 50.0;
const RAIN_SCALE_MM: f64 = 50.0;

const TEMP_WEIGHT: f64 = 0.40;
const HUMIDITY_WEIGHT: f64 = 0.25;
const WIND_WEIGHT: f64 = 0.20;
const RAIN_WEIGHT: f64 = 0.15;

/// How a candidate column turns into a metric value
#[derive(Debug, Clone, Copy)]
enum Extractor {
    /// Rounded mean of the column
    Mean,
    /// Rounded mean of the column, multiplied and rounded again
    ScaledMean(f64),
}

/// A source column paired with the extractor applied to it
#[derive(Debug, Clone, Copy)]
struct Candidate {
    column: &'static str,
    extractor: Extractor,
}

impl Candidate {
    const fn mean(column: &'static str) -> Self {
        Self {
            column,
            extractor: Extractor::Mean,
        }
    }

    const fn scaled(column: &'static str, factor: f64) -> Self {
        Self {
            column,
            extractor: Extractor::ScaledMean(factor),
        }
    }

    fn extract(&self, table: &DailySeriesTable) -> Option<f64> {
        let mean = round2(table.column_mean(self.column)?);
        match self.extractor {
            Extractor::Mean => Some(mean),
            Extractor::ScaledMean(factor) => Some(round2(mean * factor)),
        }
    }
}

const TEMPERATURE: &[Candidate] = &[Candidate::mean(T2M_MAX), Candidate::mean(T2M)];
const RAINFALL: &[Candidate] = &[Candidate::mean(PRECTOTCORR)];
const WIND: &[Candidate] = &[
    Candidate::mean(WS2M_KMH),
    Candidate::scaled(WS2M, MS_TO_KMH),
];
const HUMIDITY: &[Candidate] = &[Candidate::mean(RH2M)];

/// Result of reducing a daily series
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatsOutcome {
    /// The table had data; some metrics may still be absent
    Summary(SummaryRecord),
    /// The table was absent or empty
    NoData,
}

impl StatsOutcome {
    /// The summary record, if any
    #[must_use]
    pub const fn summary(&self) -> Option<&SummaryRecord> {
        match self {
            Self::Summary(record) => Some(record),
            Self::NoData => None,
        }
    }
}

/// Round to two decimal places
///
/// Rounds the exact binary value, ties to even: 0.125 -> 0.12, 2.675 -> 2.67.
#[must_use]
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

fn first_available(table: &DailySeriesTable, candidates: &[Candidate]) -> Option<f64> {
    candidates
        .iter()
        .find_map(|candidate| candidate.extract(table))
}

/// Reduce a daily series into a summary record
///
/// An absent or empty table is not an error; it yields `StatsOutcome::NoData`.
#[must_use]
pub fn reduce(table: Option<&DailySeriesTable>) -> StatsOutcome {
    let Some(table) = table.filter(|t| !t.is_empty()) else {
        return StatsOutcome::NoData;
    };

    let avg_temp_c = first_available(table, TEMPERATURE);
    let avg_rain_mm = first_available(table, RAINFALL);
    let avg_wind_kmh = first_available(table, WIND);
    let avg_humidity_pct = first_available(table, HUMIDITY);

    let comfort = match (avg_temp_c, avg_rain_mm, avg_wind_kmh, avg_humidity_pct) {
        (Some(t), Some(r), Some(w), Some(h)) => Some(comfort_index(t, r, w, h)),
        _ => None,
    };

    StatsOutcome::Summary(SummaryRecord {
        avg_temp_c,
        avg_rain_mm,
        avg_wind_kmh,
        avg_humidity_pct,
        comfort_index: comfort,
    })
}

/// Weighted outdoor comfort score in [0, 1], rounded to two decimals
///
/// Temperature peaks at 25 °C and decays linearly over 30 °C; humidity, wind
/// and rain each score higher when lower.
#[must_use]
pub fn comfort_index(avg_temp_c: f64, avg_rain_mm: f64, avg_wind_kmh: f64, avg_humidity_pct: f64) -> f64 {
    let temp_score = unit(1.0 - (avg_temp_c - IDEAL_TEMP_C).abs() / TEMP_TOLERANCE_C);
    let humidity_score = unit(1.0 - avg_humidity_pct / HUMIDITY_SCALE_PCT);
    let wind_score = unit(1.0 - avg_wind_kmh / WIND_SCALE_KMH);
    let rain_score = unit(1.0 - avg_rain_mm / RAIN_SCALE_MM);

    let weighted = RAIN_WEIGHT.mul_add(
        rain_score,
        WIND_WEIGHT.mul_add(
            wind_score,
            TEMP_WEIGHT.mul_add(temp_score, HUMIDITY_WEIGHT * humidity_score),
        ),
    );

    round2(unit(weighted))
}

/// Clamp to [0, 1]; NaN maps to 0
fn unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}
