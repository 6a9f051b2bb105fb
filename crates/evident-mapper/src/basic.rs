//! # Basic Resolver
//!
//! The baseline [`MetadataResolver`]. Walks registered catalogs in lexical
//! id order and returns the first catalog that maps the rule:
//!
//! 1. Skip catalogs absent from the scope.
//! 2. Look the rule id up in the catalog's procedure index.
//! 3. Look the procedure's control up in the catalog's control index.
//! 4. On a hit, build metadata from the requirement, the control family and
//!    the control's standard mappings.
//!
//! A miss at any step moves on to the next catalog. If none match, the
//! unmapped fallback is returned. Miss reasons are `trace` events only.

use std::sync::Arc;

use evident_core::{
    AssessmentPlan, CatalogId, ComplianceMetadata, EnrichmentOutcome, RuleId,
};

use crate::plans::PlanStore;
use crate::resolver::MetadataResolver;
use crate::scope::Scope;

/// Identifier of the baseline resolver.
pub const BASIC_RESOLVER_ID: &str = "basic";

#[derive(Debug, Clone, Default)]
pub struct BasicResolver {
    plans: Arc<PlanStore>,
}

impl BasicResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver reading plans from a shared store.
    pub fn with_store(plans: Arc<PlanStore>) -> Self {
        Self { plans }
    }

    pub fn plan_store(&self) -> &Arc<PlanStore> {
        &self.plans
    }
}

impl MetadataResolver for BasicResolver {
    fn id(&self) -> &str {
        BASIC_RESOLVER_ID
    }

    fn metadata(&self, rule_id: &RuleId, scope: &Scope) -> EnrichmentOutcome {
        let snapshot = self.plans.snapshot();

        for (catalog_id, catalog_plans) in snapshot.iter() {
            let Some(scoped) = scope.get(catalog_id) else {
                tracing::trace!(rule_id = %rule_id, catalog_id = %catalog_id, "catalog not found");
                continue;
            };

            let Some(procedure) = catalog_plans.procedures().get(rule_id.as_str()) else {
                tracing::trace!(rule_id = %rule_id, catalog_id = %catalog_id, "policy rule not found");
                continue;
            };

            let Some(control) = scoped.controls().get(&procedure.control_id) else {
                tracing::trace!(
                    rule_id = %rule_id,
                    catalog_id = %catalog_id,
                    control_id = %procedure.control_id,
                    "control data not found"
                );
                continue;
            };

            tracing::trace!(
                rule_id = %rule_id,
                catalog_id = %catalog_id,
                plan_version = snapshot.version(),
                "resolved"
            );

            return EnrichmentOutcome::success(ComplianceMetadata {
                control_id: procedure.requirement_id.clone(),
                category: control.category.clone(),
                catalog_id: catalog_id.to_string(),
                remediation_description: Some(procedure.documentation.clone()),
                requirements: control.requirement_refs(),
                frameworks: control.standard_refs(),
            });
        }

        tracing::trace!(rule_id = %rule_id, "no catalog in scope maps rule, unmapped");
        EnrichmentOutcome::unmapped(rule_id)
    }

    fn register_plan(&self, catalog_id: CatalogId, plans: Vec<AssessmentPlan>) -> u64 {
        self.plans.register_plan(catalog_id, plans)
    }
}
