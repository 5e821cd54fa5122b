//! Application state shared across handlers

use std::sync::Arc;

use application::{
    AdvisoryService, ApplicationError, WeatherRiskService,
    ports::{AdvisoryGeneratorPort, CachePort, HistoricalSeriesPort},
};
use infrastructure::{
    AppConfig, CachedSeriesAdapter, GeminiAdvisoryAdapter, MokaCache, PowerSeriesAdapter,
};
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Request orchestrator
    pub risk_service: Arc<WeatherRiskService>,
    /// Series cache, held for health reporting
    pub series_cache: Arc<dyn CachePort>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("risk_service", &self.risk_service)
            .field("series_cache", &self.series_cache)
            .finish()
    }
}

impl AppState {
    /// Wire adapters and services from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, ApplicationError> {
        let ttl = config.cache.ttl();

        let series_cache = Arc::new(MokaCache::for_series(config.cache.series_max_entries, ttl));
        let power = PowerSeriesAdapter::with_config(config.power.client_config())?;
        let series: Arc<dyn HistoricalSeriesPort> = Arc::new(CachedSeriesAdapter::new(
            power,
            Arc::clone(&series_cache),
            ttl,
        ));

        let generator = GeminiAdvisoryAdapter::from_config(&config.advisory)?;
        if let Some(reason) = generator.unavailable_reason() {
            info!(?reason, "External advisory generator unavailable, using rules");
        }
        let generator: Arc<dyn AdvisoryGeneratorPort> = Arc::new(generator);

        let advisory_cache: Arc<dyn CachePort> = Arc::new(MokaCache::for_advisories(
            config.cache.advisory_max_entries,
            ttl,
        ));
        let advisory = Arc::new(AdvisoryService::new(
            generator,
            advisory_cache,
            config.advisory.engine_config(ttl),
        ));

        let risk_service =
            WeatherRiskService::new(series, advisory).with_variables(config.power.parameters.clone());

        Ok(Self {
            risk_service: Arc::new(risk_service),
            series_cache,
        })
    }
}
