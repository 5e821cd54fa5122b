//! Application services - Use case implementations

mod advisory_service;
mod rule_advisor;
#[cfg(test)]
mod test_support;
mod weather_risk_service;

pub use advisory_service::{
    AdvisoryConfig, AdvisoryService, DEFAULT_ADVISORY_TIMEOUT, DEFAULT_ADVISORY_TTL,
    DEFAULT_WORKER_POOL_SIZE, advisory_cache_key, build_prompt,
};
pub use rule_advisor::{INSUFFICIENT_DATA, rule_based_advice};
pub use weather_risk_service::{
    AdvisedSummary, DEFAULT_END_YEAR, DEFAULT_START_YEAR, RiskReport, RiskRequest,
    WeatherRiskService,
};
