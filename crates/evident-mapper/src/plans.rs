//! # Plan Store
//!
//! Append-only registry of assessment plans keyed by catalog id.
//!
//! Every registration publishes a new [`PlanSnapshot`] with a strictly
//! greater version. Only the catalog being registered has its procedure
//! index rebuilt; the others are shared by `Arc` with the previous
//! snapshot. There is no removal operation.

use std::collections::BTreeMap;
use std::sync::Arc;

use evident_core::{AssessmentPlan, CatalogId};
use parking_lot::RwLock;

use crate::index::ProcedureIndex;

/// All plans registered for one catalog and their procedure index.
#[derive(Debug, Clone, Default)]
pub struct CatalogPlans {
    plans: Vec<AssessmentPlan>,
    procedures: ProcedureIndex,
}

impl CatalogPlans {
    fn with_appended(&self, plans: Vec<AssessmentPlan>) -> Self {
        let mut all = self.plans.clone();
        all.extend(plans);
        let procedures = ProcedureIndex::build(&all);
        Self {
            plans: all,
            procedures,
        }
    }

    pub fn plans(&self) -> &[AssessmentPlan] {
        &self.plans
    }

    pub fn procedures(&self) -> &ProcedureIndex {
        &self.procedures
    }
}

/// Immutable view of the store at one version.
#[derive(Debug, Clone, Default)]
pub struct PlanSnapshot {
    version: u64,
    catalogs: BTreeMap<CatalogId, Arc<CatalogPlans>>,
}

impl PlanSnapshot {
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Catalogs in lexical id order.
    pub fn iter(&self) -> impl Iterator<Item = (&CatalogId, &CatalogPlans)> {
        self.catalogs.iter().map(|(id, plans)| (id, plans.as_ref()))
    }

    pub fn get(&self, catalog_id: &CatalogId) -> Option<&CatalogPlans> {
        self.catalogs.get(catalog_id).map(Arc::as_ref)
    }

    pub fn catalog_count(&self) -> usize {
        self.catalogs.len()
    }
}

#[derive(Debug, Default)]
pub struct PlanStore {
    current: RwLock<Arc<PlanSnapshot>>,
}

impl PlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Arc<PlanSnapshot> {
        Arc::clone(&self.current.read())
    }

    pub fn version(&self) -> u64 {
        self.current.read().version
    }

    /// Append `plans` to those registered under `catalog_id` and publish a
    /// new snapshot. Returns the new version.
    ///
    /// Writers are serialised by the write lock so no registration is lost.
    pub fn register_plan(&self, catalog_id: CatalogId, plans: Vec<AssessmentPlan>) -> u64 {
        let mut guard = self.current.write();
        let rebuilt = match guard.catalogs.get(&catalog_id) {
            Some(existing) => existing.with_appended(plans),
            None => CatalogPlans::default().with_appended(plans),
        };

        let mut catalogs = guard.catalogs.clone();
        let procedure_count = rebuilt.procedures.len();
        catalogs.insert(catalog_id.clone(), Arc::new(rebuilt));

        let version = guard.version + 1;
        *guard = Arc::new(PlanSnapshot { version, catalogs });

        tracing::debug!(
            catalog_id = %catalog_id,
            procedures = procedure_count,
            version,
            "registered assessment plans"
        );
        version
    }
}
