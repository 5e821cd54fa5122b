//! Advisory engine
//!
//! Produces a short advisory for a summary record. The external generator
//! is preferred; every failure mode resolves to the rule-based advisory, so
//! [`AdvisoryService::advise`] never fails and never returns empty text.

use std::{fmt, sync::Arc, time::Duration};

use domain::SummaryRecord;
use serde_json::Value;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use super::rule_advisor::rule_based_advice;
use crate::{
    error::ApplicationError,
    ports::{AdvisoryGeneratorPort, CachePort, CachePortExt, GenerationOutcome},
};

const ADVISORY_KEY_PREFIX: &str = "advisory";

/// Default wait for the external generator
pub const DEFAULT_ADVISORY_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of concurrent external calls
pub const DEFAULT_WORKER_POOL_SIZE: usize = 3;

/// Default advisory cache lifetime
pub const DEFAULT_ADVISORY_TTL: Duration = Duration::from_secs(60 * 60);

/// Tuning for the advisory engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvisoryConfig {
    /// How long the caller waits for the external generator
    pub timeout: Duration,
    /// Maximum concurrent external calls
    pub worker_pool_size: usize,
    /// Lifetime of cached advisories
    pub cache_ttl: Duration,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_ADVISORY_TIMEOUT,
            worker_pool_size: DEFAULT_WORKER_POOL_SIZE,
            cache_ttl: DEFAULT_ADVISORY_TTL,
        }
    }
}

/// Stable cache key for a summary
///
/// blake3 over the JSON form of the record with keys sorted, so two equal
/// summaries always share a key.
pub fn advisory_cache_key(summary: &SummaryRecord) -> Result<String, ApplicationError> {
    let stable = stable_json(summary)?;
    let hash = blake3::hash(stable.to_string().as_bytes());
    Ok(format!("{ADVISORY_KEY_PREFIX}:{}", hash.to_hex()))
}

/// Summary as a JSON value with object keys in sorted order
fn stable_json(summary: &SummaryRecord) -> Result<Value, ApplicationError> {
    // serde_json's default map is ordered by key
    serde_json::to_value(summary)
        .map_err(|e| ApplicationError::Internal(format!("Summary serialization error: {e}")))
}

/// Prompt sent to the external generator
pub fn build_prompt(summary: &SummaryRecord) -> Result<String, ApplicationError> {
    let data = serde_json::to_string_pretty(&stable_json(summary)?)
        .map_err(|e| ApplicationError::Internal(format!("Summary serialization error: {e}")))?;

    Ok(format!(
        "You are Gene, a concise and friendly weather analyst. \
         Based on these summarized parameters, generate 2-4 short sentences with practical, \
         actionable advice for a user planning outdoor activities. \
         Do not include long disclaimers. Keep it under 120 words.\n\n\
         Data: {data}\n\n\
         Output:"
    ))
}

/// Map a generation outcome onto advisory text
fn resolve_outcome(outcome: &GenerationOutcome, summary: &SummaryRecord) -> String {
    if let Some(text) = outcome.usable_text() {
        return text.to_string();
    }
    match outcome {
        GenerationOutcome::Disabled | GenerationOutcome::MissingCredential => {
            info!(outcome = ?outcome, "Advisory generator unavailable, using rule-based advice");
        },
        GenerationOutcome::Text(_) | GenerationOutcome::Empty => {
            warn!("Advisory generator returned empty text, using rule-based advice");
        },
        GenerationOutcome::Failed(reason) => {
            warn!(reason = %reason, "Advisory generator failed, using rule-based advice");
        },
    }
    rule_based_advice(summary)
}

async fn store(cache: &dyn CachePort, key: &str, advice: &str, ttl: Duration) {
    if let Err(e) = cache.set(key, &advice, ttl).await {
        warn!(error = %e, "Failed to cache advisory");
    }
}

/// One external generation, run on a spawned task
struct GenerationJob {
    generator: Arc<dyn AdvisoryGeneratorPort>,
    cache: Arc<dyn CachePort>,
    workers: Arc<Semaphore>,
    key: String,
    prompt: String,
    summary: SummaryRecord,
    ttl: Duration,
}

impl GenerationJob {
    /// Generate, resolve and cache. Runs to completion even when the
    /// caller has stopped waiting.
    async fn run(self) -> String {
        let Ok(_permit) = self.workers.acquire_owned().await else {
            return rule_based_advice(&self.summary);
        };

        let outcome = self.generator.generate(&self.prompt).await;
        let advice = resolve_outcome(&outcome, &self.summary);
        store(self.cache.as_ref(), &self.key, &advice, self.ttl).await;
        advice
    }
}

/// Advisory engine with cache, bounded worker pool and timeout
pub struct AdvisoryService {
    generator: Arc<dyn AdvisoryGeneratorPort>,
    cache: Arc<dyn CachePort>,
    workers: Arc<Semaphore>,
    config: AdvisoryConfig,
}

impl fmt::Debug for AdvisoryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvisoryService")
            .field("cache", &self.cache)
            .field("available_workers", &self.workers.available_permits())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AdvisoryService {
    /// Create a new advisory service
    pub fn new(
        generator: Arc<dyn AdvisoryGeneratorPort>,
        cache: Arc<dyn CachePort>,
        config: AdvisoryConfig,
    ) -> Self {
        Self {
            generator,
            cache,
            workers: Arc::new(Semaphore::new(config.worker_pool_size.max(1))),
            config,
        }
    }

    /// Cache used for advisories
    pub fn cache(&self) -> &Arc<dyn CachePort> {
        &self.cache
    }

    /// Produce an advisory for a summary
    ///
    /// Never fails. A cache hit returns immediately. An all-absent summary
    /// bypasses the cache. When the caller's wait elapses the in-flight
    /// generation is abandoned and may still populate the cache later.
    #[instrument(skip(self, summary))]
    pub async fn advise(&self, summary: &SummaryRecord) -> String {
        if summary.is_degenerate() {
            return rule_based_advice(summary);
        }

        let key = match advisory_cache_key(summary) {
            Ok(key) => key,
            Err(e) => {
                warn!(error = %e, "Could not derive advisory cache key");
                return rule_based_advice(summary);
            },
        };

        match self.cache.get::<String>(&key).await {
            Ok(Some(advice)) => {
                debug!("Advisory cache hit");
                return advice;
            },
            Ok(None) => debug!("Advisory cache miss"),
            Err(e) => warn!(error = %e, "Advisory cache read failed"),
        }

        if let Some(reason) = self.generator.unavailable_reason() {
            let advice = resolve_outcome(&reason, summary);
            store(self.cache.as_ref(), &key, &advice, self.config.cache_ttl).await;
            return advice;
        }

        let prompt = match build_prompt(summary) {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!(error = %e, "Could not build advisory prompt");
                return rule_based_advice(summary);
            },
        };

        let job = GenerationJob {
            generator: Arc::clone(&self.generator),
            cache: Arc::clone(&self.cache),
            workers: Arc::clone(&self.workers),
            key,
            prompt,
            summary: *summary,
            ttl: self.config.cache_ttl,
        };
        let handle = tokio::spawn(job.run());

        match tokio::time::timeout(self.config.timeout, handle).await {
            Ok(Ok(advice)) => advice,
            Ok(Err(e)) => {
                warn!(error = %e, "Advisory task aborted, using rule-based advice");
                rule_based_advice(summary)
            },
            Err(_) => {
                warn!(
                    timeout_ms = u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX),
                    "Advisory generation timed out, using rule-based advice"
                );
                rule_based_advice(summary)
            },
        }
    }
}
