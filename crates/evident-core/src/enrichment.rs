//! # Enrichment Combiner
//!
//! Joins cacheable resolver output with a freshly computed verdict. This is
//! the seam caching stops at: callers pass an [`EnrichmentOutcome`] that may
//! have come from a cache, but the [`ComplianceVerdict`] must always be
//! computed from the evidence in hand.

use serde::{Deserialize, Serialize};

use crate::metadata::{ComplianceMetadata, EnrichmentOutcome, EnrichmentStatus};
use crate::status::ComplianceVerdict;

/// The unit of enrichment returned to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedResult {
    pub metadata: ComplianceMetadata,
    pub enrichment_status: EnrichmentStatus,
    pub verdict: ComplianceVerdict,
}

pub fn combine(outcome: EnrichmentOutcome, verdict: ComplianceVerdict) -> EnrichedResult {
    EnrichedResult {
        metadata: outcome.metadata,
        enrichment_status: outcome.enrichment_status,
        verdict,
    }
}
