//! Deterministic rule-based advisory
//!
//! Always available, used whenever the external generator is disabled,
//! unreachable, slow, or returns nothing usable.

use domain::SummaryRecord;

/// Returned when no clause applies
pub const INSUFFICIENT_DATA: &str = "Insufficient data to generate advice.";

fn temperature_clause(avg_temp_c: f64) -> &'static str {
    if avg_temp_c > 35.0 {
        "Expect very hot conditions; avoid strenuous activity midday."
    } else if avg_temp_c > 28.0 {
        "Warm temperatures expected; stay hydrated."
    } else if avg_temp_c < 15.0 {
        "Cool conditions expected; bring a jacket."
    } else {
        "Temperatures look moderate."
    }
}

fn rainfall_clause(avg_rain_mm: f64) -> &'static str {
    if avg_rain_mm > 10.0 {
        "High chance of rain\u{2014}carry rain gear."
    } else if avg_rain_mm > 2.0 {
        "Light showers possible."
    } else {
        "Mostly dry expected."
    }
}

fn comfort_clause(comfort_index: f64) -> &'static str {
    if comfort_index >= 0.7 {
        "Overall: comfortable for outdoor activities."
    } else if comfort_index >= 0.4 {
        "Overall: fair; some discomfort possible."
    } else {
        "Overall: uncomfortable\u{2014}consider indoor alternatives."
    }
}

/// Build the advisory from fixed thresholds
///
/// Clause order: temperature, rainfall, humidity, wind, overall comfort.
/// Clauses are joined by single spaces.
#[must_use]
pub fn rule_based_advice(summary: &SummaryRecord) -> String {
    let mut clauses: Vec<&'static str> = Vec::with_capacity(5);

    if let Some(t) = summary.avg_temp_c {
        clauses.push(temperature_clause(t));
    }
    if let Some(r) = summary.avg_rain_mm {
        clauses.push(rainfall_clause(r));
    }
    if summary.avg_humidity_pct.is_some_and(|h| h > 75.0) {
        clauses.push("High humidity may cause discomfort.");
    }
    if summary.avg_wind_kmh.is_some_and(|w| w > 25.0) {
        clauses.push("Windy conditions likely\u{2014}secure loose items.");
    }
    if let Some(c) = summary.comfort_index {
        clauses.push(comfort_clause(c));
    }

    if clauses.is_empty() {
        INSUFFICIENT_DATA.to_string()
    } else {
        clauses.join(" ")
    }
}
