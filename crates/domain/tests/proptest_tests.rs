//! Property-based tests for the summary reducer
//!
//! These tests use proptest to verify invariants across many random inputs.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use domain::{
    DailySeriesTable, GeoLocation, StatsOutcome, YearRange, comfort_index, reduce,
    variables::{PRECTOTCORR, RH2M, T2M_MAX, WS2M},
};
use proptest::prelude::*;

fn is_two_decimal(value: f64) -> bool {
    ((value * 100.0).round() / 100.0 - value).abs() < 1e-9
}

fn build_table(columns: Vec<(&str, Vec<Option<f64>>)>) -> DailySeriesTable {
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or(NaiveDate::MIN);
    let variables = columns
        .into_iter()
        .map(|(name, cells)| {
            let values = cells
                .into_iter()
                .zip(start.iter_days())
                .map(|(cell, date)| (date, cell))
                .collect::<BTreeMap<_, _>>();
            (name.to_string(), values)
        })
        .collect();
    DailySeriesTable::from_variables(variables)
}

fn cells(range: std::ops::Range<f64>) -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::weighted(0.8, range), 1..40)
}

// ============================================================================
// Comfort index
// ============================================================================

mod comfort_tests {
    use super::*;

    proptest! {
        #[test]
        fn comfort_is_bounded(
            temp in -60.0f64..60.0,
            rain in -5.0f64..300.0,
            wind in -5.0f64..200.0,
            humidity in -5.0f64..120.0
        ) {
            let score = comfort_index(temp, rain, wind, humidity);
            prop_assert!((0.0..=1.0).contains(&score));
            prop_assert!(is_two_decimal(score));
        }

        #[test]
        fn warmer_than_ideal_never_scores_higher(delta in 0.0f64..40.0) {
            let ideal = comfort_index(25.0, 0.0, 0.0, 0.0);
            let off = comfort_index(25.0 + delta, 0.0, 0.0, 0.0);
            prop_assert!(off <= ideal);
        }
    }
}

// ============================================================================
// Reducer
// ============================================================================

mod reducer_tests {
    use super::*;

    proptest! {
        #[test]
        fn present_metrics_are_rounded(
            temp in cells(-30.0..45.0),
            rain in cells(0.0..80.0),
            wind in cells(0.0..15.0),
            humidity in cells(0.0..100.0)
        ) {
            let table = build_table(vec![
                (T2M_MAX, temp),
                (PRECTOTCORR, rain),
                (WS2M, wind),
                (RH2M, humidity),
            ]);

            let StatsOutcome::Summary(record) = reduce(Some(&table)) else {
                return Err(TestCaseError::fail("non-empty table reduced to NoData"));
            };

            for value in [
                record.avg_temp_c,
                record.avg_rain_mm,
                record.avg_wind_kmh,
                record.avg_humidity_pct,
                record.comfort_index,
            ]
            .into_iter()
            .flatten()
            {
                prop_assert!(is_two_decimal(value), "{value} has more than two decimals");
            }
        }

        #[test]
        fn comfort_present_iff_all_averages_present(
            temp in cells(-30.0..45.0),
            rain in cells(0.0..80.0),
            humidity in cells(0.0..100.0),
            include_wind in any::<bool>()
        ) {
            let mut columns = vec![(T2M_MAX, temp), (PRECTOTCORR, rain), (RH2M, humidity)];
            if include_wind {
                columns.push((WS2M, vec![Some(3.0)]));
            }
            let table = build_table(columns);

            let StatsOutcome::Summary(record) = reduce(Some(&table)) else {
                return Err(TestCaseError::fail("non-empty table reduced to NoData"));
            };

            prop_assert_eq!(record.comfort_index.is_some(), record.has_all_averages());
            if let Some(score) = record.comfort_index {
                prop_assert!((0.0..=1.0).contains(&score));
            }
        }
    }
}

// ============================================================================
// Value objects
// ============================================================================

mod value_object_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_create_location(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(GeoLocation::new(lat, lon).is_ok());
        }

        #[test]
        fn year_tokens_are_fixed_width(start in 1i32..=9999, span in 0i32..20) {
            let end = (start + span).min(9999);
            let range = YearRange::new(start, end);
            prop_assert!(range.is_ok());
            if let Ok(range) = range {
                prop_assert_eq!(range.start_token().len(), 8);
                prop_assert_eq!(range.end_token().len(), 8);
                prop_assert!(range.start_token().ends_with("0101"));
                prop_assert!(range.end_token().ends_with("1231"));
            }
        }
    }
}
