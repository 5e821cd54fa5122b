//! Cached series adapter - Decorator that adds caching to any `HistoricalSeriesPort`
//!
//! Only successful fetches are stored; a failed query is retried on the
//! next identical request.

use std::{sync::Arc, time::Duration};

use application::{
    error::ApplicationError,
    ports::{CachePort, CachePortExt, HistoricalSeriesPort},
};
use async_trait::async_trait;
use domain::{DailySeriesTable, SeriesQuery};
use tracing::{debug, instrument, warn};

use crate::cache::series_cache_key;

/// Caching decorator for series ports
pub struct CachedSeriesAdapter<S: HistoricalSeriesPort, C: CachePort> {
    /// The underlying series implementation
    inner: S,
    /// Cache for storing tables
    cache: Arc<C>,
    /// Lifetime of cached tables
    ttl: Duration,
}

impl<S: HistoricalSeriesPort + std::fmt::Debug, C: CachePort> std::fmt::Debug
    for CachedSeriesAdapter<S, C>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedSeriesAdapter")
            .field("inner", &self.inner)
            .field("cache", &self.cache)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl<S: HistoricalSeriesPort, C: CachePort> CachedSeriesAdapter<S, C> {
    /// Create a new cached series adapter
    pub const fn new(inner: S, cache: Arc<C>, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }

    async fn get_cached(&self, key: &str) -> Option<DailySeriesTable> {
        match self.cache.get::<DailySeriesTable>(key).await {
            Ok(Some(table)) => {
                debug!(key = %key, "Series cache hit");
                Some(table)
            },
            Ok(None) => {
                debug!(key = %key, "Series cache miss");
                None
            },
            Err(e) => {
                warn!(error = %e, key = %key, "Series cache read error");
                None
            },
        }
    }
}

#[async_trait]
impl<S: HistoricalSeriesPort, C: CachePort> HistoricalSeriesPort for CachedSeriesAdapter<S, C> {
    #[instrument(skip(self, query), fields(location = %query.location))]
    async fn fetch(&self, query: &SeriesQuery) -> Result<DailySeriesTable, ApplicationError> {
        let key = series_cache_key(query);

        if let Some(table) = self.get_cached(&key).await {
            return Ok(table);
        }

        let table = self.inner.fetch(query).await?;

        if let Err(e) = self.cache.set(&key, &table, self.ttl).await {
            warn!(error = %e, key = %key, "Series cache write error");
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDate;
    use domain::{GeoLocation, YearRange};

    use super::*;
    use crate::cache::MokaCache;

    /// Counts calls; fails while `failures` is positive
    #[derive(Debug, Default)]
    struct CountingSeries {
        calls: AtomicUsize,
        failures: AtomicUsize,
    }

    #[async_trait]
    impl HistoricalSeriesPort for CountingSeries {
        async fn fetch(&self, _query: &SeriesQuery) -> Result<DailySeriesTable, ApplicationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self
                .failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(ApplicationError::Upstream("HTTP 503".into()));
            }
            let day = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
            let mut variables = BTreeMap::new();
            variables.insert("T2M_MAX".to_string(), BTreeMap::from([(day, Some(21.5))]));
            Ok(DailySeriesTable::from_variables(variables))
        }
    }

    fn query() -> SeriesQuery {
        SeriesQuery::for_years(
            GeoLocation::new(52.5, 13.4).unwrap(),
            YearRange::new(2020, 2020).unwrap(),
        )
    }

    #[tokio::test]
    async fn second_fetch_is_served_from_cache() {
        let cache = Arc::new(MokaCache::new());
        let adapter =
            CachedSeriesAdapter::new(CountingSeries::default(), cache.clone(), Duration::from_secs(60));

        let first = adapter.fetch(&query()).await.unwrap();
        let second = adapter.fetch(&query()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(adapter.inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats().hits, 1);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let inner = CountingSeries {
            failures: AtomicUsize::new(1),
            ..Default::default()
        };
        let adapter =
            CachedSeriesAdapter::new(inner, Arc::new(MokaCache::new()), Duration::from_secs(60));

        assert!(adapter.fetch(&query()).await.is_err());
        assert!(adapter.fetch(&query()).await.is_ok());
        assert!(adapter.fetch(&query()).await.is_ok());
        assert_eq!(adapter.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn distinct_queries_miss_separately() {
        let adapter = CachedSeriesAdapter::new(
            CountingSeries::default(),
            Arc::new(MokaCache::new()),
            Duration::from_secs(60),
        );
        let other = SeriesQuery::for_years(
            GeoLocation::new(52.5, 13.41).unwrap(),
            YearRange::new(2020, 2020).unwrap(),
        );

        adapter.fetch(&query()).await.unwrap();
        adapter.fetch(&other).await.unwrap();

        assert_eq!(adapter.inner.calls.load(Ordering::SeqCst), 2);
    }
}
