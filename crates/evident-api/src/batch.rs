//! # Batch Request Handler
//!
//! Resolves a bounded list of policy references. Each item is resolved on
//! its own with the resolver selected for its engine, so one item's outcome
//! never affects another's. Every valid input item yields exactly one
//! result, in input order, carrying its original index.
//!
//! Unmapped rules count as successes. The `failed` count is reserved for
//! items that produced no outcome at all, which a remote source can report
//! but in-process resolution never does.

use evident_core::wire::{
    validate_batch_size, BatchItemResult, BatchMetadataResponse, BatchSummary,
};
use evident_core::{PolicyReference, ValidationError};
use evident_mapper::{ResolverSet, Scope};

/// Resolve each policy independently, without size validation.
pub fn resolve_items(
    resolvers: &ResolverSet,
    scope: &Scope,
    policies: &[PolicyReference],
) -> Vec<BatchItemResult> {
    policies
        .iter()
        .enumerate()
        .map(|(index, policy)| {
            let resolver = resolvers.select(&policy.engine_name);
            let outcome = resolver.metadata(&policy.rule_id, scope);
            BatchItemResult::resolved(index, policy.rule_id.clone(), outcome)
        })
        .collect()
}

/// Validate and resolve a batch request.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyBatch`] for an empty list and
/// [`ValidationError::BatchTooLarge`] for one longer than `max_batch_size`.
/// Nothing is resolved in either case.
pub fn handle_batch(
    resolvers: &ResolverSet,
    scope: &Scope,
    policies: &[PolicyReference],
    max_batch_size: usize,
) -> Result<BatchMetadataResponse, ValidationError> {
    validate_batch_size(policies.len(), max_batch_size)?;

    let results = resolve_items(resolvers, scope, policies);
    let summary = BatchSummary::from_results(&results);

    tracing::debug!(
        total = summary.total,
        success = summary.success,
        failed = summary.failed,
        "processed metadata batch"
    );

    Ok(BatchMetadataResponse { results, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use evident_core::{
        AssessmentPlan, CatalogId, ComplianceCatalog, Control, ControlFamily, EngineName,
        EnrichmentOutcome, EnrichmentStatus, Procedure, Requirement, RuleId,
    };
    use evident_mapper::{BasicResolver, MetadataResolver};

    fn policy(engine: &str, rule: &str) -> PolicyReference {
        PolicyReference::new(EngineName::new(engine).unwrap(), RuleId::new(rule).unwrap())
    }

    fn setup() -> (ResolverSet, Scope) {
        let basic = BasicResolver::new();
        basic.register_plan(
            CatalogId::new("cat-A").unwrap(),
            vec![AssessmentPlan {
                control_id: "AC".into(),
                requirements: vec![Requirement {
                    requirement_id: "AC-1-REQ".into(),
                    procedures: vec![Procedure {
                        procedure_id: "AC-1".into(),
                        documentation: String::new(),
                    }],
                }],
            }],
        );
        let scope = Scope::from_catalogs([ComplianceCatalog {
            catalog_id: CatalogId::new("cat-A").unwrap(),
            control_families: vec![ControlFamily {
                title: "Access Control".into(),
                controls: vec![Control {
                    control_id: "AC".into(),
                    standard_mappings: vec![],
                }],
            }],
        }]);
        (ResolverSet::new(Arc::new(basic)), scope)
    }

    #[derive(Debug)]
    struct Tagging;

    impl MetadataResolver for Tagging {
        fn id(&self) -> &str {
            "tagging"
        }

        fn metadata(&self, rule_id: &RuleId, _scope: &Scope) -> EnrichmentOutcome {
            let mut outcome = EnrichmentOutcome::unmapped(rule_id);
            outcome.metadata.category = "Tagged".into();
            outcome
        }

        fn register_plan(&self, _catalog_id: CatalogId, _plans: Vec<AssessmentPlan>) -> u64 {
            0
        }
    }

    #[test]
    fn empty_batch_rejected() {
        let (resolvers, scope) = setup();
        assert_eq!(
            handle_batch(&resolvers, &scope, &[], 100).unwrap_err(),
            ValidationError::EmptyBatch
        );
    }

    #[test]
    fn oversize_batch_rejected() {
        let (resolvers, scope) = setup();
        let policies = vec![policy("opa", "AC-1"); 3];
        assert_eq!(
            handle_batch(&resolvers, &scope, &policies, 2).unwrap_err(),
            ValidationError::BatchTooLarge { len: 3, max: 2 }
        );
    }

    #[test]
    fn mixed_batch_counts_unmapped_as_success() {
        let (resolvers, scope) = setup();
        let policies = [policy("opa", "AC-1"), policy("kyverno", "ZZ-1")];

        let response = handle_batch(&resolvers, &scope, &policies, 100).unwrap();

        assert_eq!(response.summary, BatchSummary { total: 2, success: 2, failed: 0 });
        assert_eq!(response.results[0].index, 0);
        assert_eq!(
            response.results[0].compliance.as_ref().unwrap().enrichment_status,
            EnrichmentStatus::Success
        );
        assert_eq!(response.results[1].index, 1);
        assert_eq!(response.results[1].policy_rule_id.as_str(), "ZZ-1");
        assert_eq!(
            response.results[1].compliance.as_ref().unwrap().enrichment_status,
            EnrichmentStatus::Unmapped
        );
    }

    #[test]
    fn resolver_selected_per_item() {
        let (mut resolvers, scope) = setup();
        resolvers
            .register(EngineName::new("custom").unwrap(), Arc::new(Tagging))
            .unwrap();
        let policies = [policy("custom", "AC-1"), policy("opa", "AC-1")];

        let results = resolve_items(&resolvers, &scope, &policies);

        assert_eq!(results[0].compliance.as_ref().unwrap().metadata.category, "Tagged");
        assert_eq!(
            results[1].compliance.as_ref().unwrap().metadata.category,
            "Access Control"
        );
    }
}
