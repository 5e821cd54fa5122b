//! Provider variable identifiers (NASA POWER daily parameters)

/// Daily maximum temperature at 2 m, °C
pub const T2M_MAX: &str = "T2M_MAX";
/// Daily mean temperature at 2 m, °C
pub const T2M: &str = "T2M";
/// Bias-corrected total precipitation, mm/day
pub const PRECTOTCORR: &str = "PRECTOTCORR";
/// Wind speed at 2 m, m/s
pub const WS2M: &str = "WS2M";
/// Wind speed at 2 m converted to km/h (derived, never requested)
pub const WS2M_KMH: &str = "WS2M_kmh";
/// Relative humidity at 2 m, %
pub const RH2M: &str = "RH2M";

/// Multiplier from m/s to km/h
pub const MS_TO_KMH: f64 = 3.6;

/// Variables requested when the caller does not name any
pub const DEFAULT_VARIABLES: [&str; 4] = [T2M_MAX, PRECTOTCORR, WS2M, RH2M];
