//! # Resolver Plugin Seam
//!
//! A [`MetadataResolver`] turns a rule id and a scope into static compliance
//! metadata. Implementations are selected per policy engine by
//! [`ResolverSet`](crate::registry::ResolverSet).

use std::fmt;

use evident_core::{
    calculate, combine, AssessmentPlan, CatalogId, ComplianceVerdict, EnrichedResult,
    EnrichmentOutcome, Evidence, RuleId,
};

use crate::scope::Scope;

// ---------------------------------------------------------------------------
// MetadataResolver Trait
// ---------------------------------------------------------------------------

/// Resolves policy rules to compliance metadata.
///
/// ## Contract
///
/// - [`metadata`](Self::metadata) never fails. A rule no catalog maps
///   yields [`EnrichmentOutcome::unmapped`].
/// - With unchanged scope and plans, `metadata` is idempotent, which is what
///   allows callers to cache its result forever.
/// - [`calculate_status`](Self::calculate_status) depends only on the
///   evidence and is never cached.
pub trait MetadataResolver: Send + Sync + fmt::Debug {
    /// Stable identifier of this implementation, e.g. `"basic"`.
    fn id(&self) -> &str;

    /// Static metadata for `rule_id` under `scope`.
    fn metadata(&self, rule_id: &RuleId, scope: &Scope) -> EnrichmentOutcome;

    /// Verdict for one piece of evidence.
    fn calculate_status(&self, evidence: &Evidence) -> ComplianceVerdict {
        calculate(evidence)
    }

    /// Append assessment plans for a catalog. Returns the resulting plan
    /// version.
    fn register_plan(&self, catalog_id: CatalogId, plans: Vec<AssessmentPlan>) -> u64;

    /// Resolve metadata and compute the verdict in one step, with no caching.
    fn enrich(&self, evidence: &Evidence, scope: &Scope) -> EnrichedResult {
        let outcome = self.metadata(evidence.rule_id(), scope);
        combine(outcome, self.calculate_status(evidence))
    }
}
