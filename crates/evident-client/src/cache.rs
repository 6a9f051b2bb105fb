//! # Metadata Cache
//!
//! Concurrent `rule id → EnrichmentOutcome` map with no expiry.
//!
//! Entries are written once on first resolution and overwritten only by a
//! deliberate re-fetch of the same id. Each operation is atomic on its own;
//! a get-or-fetch sequence is not, so two tasks may fetch the same cold id
//! concurrently. The last writer wins with an equivalent value.

use std::sync::Arc;

use dashmap::DashMap;
use evident_core::{EnrichmentOutcome, RuleId};

/// Cloning yields a handle to the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MetadataCache {
    entries: Arc<DashMap<RuleId, EnrichmentOutcome>>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, rule_id: &RuleId) -> Option<EnrichmentOutcome> {
        self.entries.get(rule_id).map(|entry| entry.value().clone())
    }

    /// Store `outcome`, returning the previous entry if any.
    pub fn insert(&self, rule_id: RuleId, outcome: EnrichmentOutcome) -> Option<EnrichmentOutcome> {
        self.entries.insert(rule_id, outcome)
    }

    pub fn contains(&self, rule_id: &RuleId) -> bool {
        self.entries.contains_key(rule_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let cache = MetadataCache::new();
        let other = cache.clone();
        let rule = RuleId::new("AC-1").unwrap();

        assert!(cache
            .insert(rule.clone(), EnrichmentOutcome::unmapped(&rule))
            .is_none());

        assert!(other.contains(&rule));
        assert_eq!(other.len(), 1);
        assert_eq!(other.get(&rule), Some(EnrichmentOutcome::unmapped(&rule)));
    }

    #[test]
    fn insert_overwrites() {
        let cache = MetadataCache::new();
        let rule = RuleId::new("AC-1").unwrap();
        cache.insert(rule.clone(), EnrichmentOutcome::unmapped(&rule));

        let mut refreshed = EnrichmentOutcome::unmapped(&rule);
        refreshed.metadata.category = "Access Control".into();
        let previous = cache.insert(rule.clone(), refreshed.clone());

        assert_eq!(previous.unwrap().metadata.category, "Unknown");
        assert_eq!(cache.get(&rule), Some(refreshed));
    }
}
