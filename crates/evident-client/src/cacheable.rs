//! # Cached Metadata Client
//!
//! Retrieve and prefetch over a [`MetadataSource`], with a [`MetadataCache`]
//! in front.
//!
//! ## Retrieve
//!
//! 1. Cache hit: skip the source entirely.
//! 2. Cache miss: fetch the single rule from the source and cache the result.
//!    A fetch failure is returned to the caller and nothing is cached.
//! 3. Either way, compute the verdict from the evidence and combine.
//!
//! ## Prefetch
//!
//! Deduplicate rule ids in first-seen order, split them into chunks of
//! `batch_size` and send one batch request per chunk. A failed chunk is
//! logged and skipped. Items that carry an error, or no outcome, are not
//! cached.

use std::collections::HashSet;
use std::sync::Arc;

use evident_core::{calculate, combine, EnrichedResult, Evidence, PolicyReference};

use crate::cache::MetadataCache;
use crate::config::{ClientConfig, DEFAULT_PREFETCH_BATCH_SIZE};
use crate::error::ClientError;
use crate::source::MetadataSource;

/// What a prefetch run did. Prefetch itself never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrefetchReport {
    /// Policy references passed in.
    pub requested: usize,
    /// Distinct rule ids after deduplication.
    pub unique: usize,
    /// Batch requests sent.
    pub batches: usize,
    /// Batch requests that failed outright.
    pub failed_batches: usize,
    /// Entries written to the cache.
    pub cached: usize,
}

#[derive(Clone)]
pub struct CachedMetadataClient {
    source: Arc<dyn MetadataSource>,
    cache: MetadataCache,
    batch_size: usize,
}

impl std::fmt::Debug for CachedMetadataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedMetadataClient")
            .field("cached", &self.cache.len())
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

impl CachedMetadataClient {
    pub fn new(source: Arc<dyn MetadataSource>) -> Self {
        Self {
            source,
            cache: MetadataCache::new(),
            batch_size: DEFAULT_PREFETCH_BATCH_SIZE,
        }
    }

    /// Set the prefetch chunk size. Zero is treated as one.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Enrich one piece of evidence, fetching metadata only on a cache miss.
    pub async fn retrieve(&self, evidence: &Evidence) -> Result<EnrichedResult, ClientError> {
        let rule_id = evidence.rule_id();

        let outcome = match self.cache.get(rule_id) {
            Some(outcome) => {
                tracing::debug!(rule_id = %rule_id, "metadata cache hit");
                outcome
            }
            None => {
                tracing::debug!(rule_id = %rule_id, "metadata cache miss");
                let outcome = self
                    .source
                    .fetch_metadata(&evidence.policy)
                    .await
                    .map_err(|e| {
                        tracing::error!(rule_id = %rule_id, error = %e, "failed to fetch metadata");
                        e
                    })?;
                self.cache.insert(rule_id.clone(), outcome.clone());
                outcome
            }
        };

        Ok(combine(outcome, calculate(evidence)))
    }

    /// Warm the cache for `policies`. Best-effort; see the module docs.
    pub async fn prefetch(&self, policies: &[PolicyReference]) -> PrefetchReport {
        let mut report = PrefetchReport {
            requested: policies.len(),
            ..PrefetchReport::default()
        };

        let mut seen = HashSet::new();
        let unique: Vec<PolicyReference> = policies
            .iter()
            .filter(|p| seen.insert(p.rule_id.clone()))
            .cloned()
            .collect();
        report.unique = unique.len();

        if unique.is_empty() {
            tracing::info!("no policy rule ids to prefetch");
            return report;
        }

        tracing::info!(
            count = unique.len(),
            batch_size = self.batch_size,
            "starting metadata prefetch"
        );

        for (n, batch) in unique.chunks(self.batch_size).enumerate() {
            report.batches += 1;
            let batch_start = n * self.batch_size;
            match self.source.fetch_metadata_batch(batch).await {
                Ok(results) => {
                    for result in results {
                        if result.error.is_some() {
                            continue;
                        }
                        if let Some(outcome) = result.compliance {
                            self.cache.insert(result.policy_rule_id, outcome);
                            report.cached += 1;
                        }
                    }
                }
                Err(e) => {
                    report.failed_batches += 1;
                    tracing::warn!(
                        batch_start,
                        batch_size = batch.len(),
                        error = %e,
                        "failed to prefetch batch"
                    );
                }
            }
        }

        tracing::info!(
            cached = report.cached,
            batches = report.batches,
            failed_batches = report.failed_batches,
            "completed metadata prefetch"
        );
        report
    }

    /// Prefetch the policies listed in `config`. Never fails start-up.
    pub async fn warm_up(&self, config: &ClientConfig) -> PrefetchReport {
        if config.prefetch.is_empty() {
            return PrefetchReport::default();
        }
        tracing::info!(count = config.prefetch.len(), "prefetching configured policies");
        self.prefetch(&config.prefetch).await
    }
}
