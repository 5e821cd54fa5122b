//! Summary statistics for one location and date range

use serde::{Deserialize, Serialize};

/// Averages over a daily series plus the derived comfort index
///
/// `comfort_index` is present only when all four averages are present.
/// Absent values serialize as `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    #[serde(rename = "avg_temp_C")]
    pub avg_temp_c: Option<f64>,
    pub avg_rain_mm: Option<f64>,
    pub avg_wind_kmh: Option<f64>,
    pub avg_humidity_pct: Option<f64>,
    pub comfort_index: Option<f64>,
}

impl SummaryRecord {
    /// True when no field carries a value
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.avg_temp_c.is_none()
            && self.avg_rain_mm.is_none()
            && self.avg_wind_kmh.is_none()
            && self.avg_humidity_pct.is_none()
            && self.comfort_index.is_none()
    }

    /// True when all four base averages are present
    #[must_use]
    pub const fn has_all_averages(&self) -> bool {
        self.avg_temp_c.is_some()
            && self.avg_rain_mm.is_some()
            && self.avg_wind_kmh.is_some()
            && self.avg_humidity_pct.is_some()
    }
}
