//! # Scope
//!
//! The catalogs currently in force for resolution. A [`Scope`] is immutable;
//! changing the active catalogs means building a new one and publishing it
//! through a [`ScopeHandle`].

use std::collections::BTreeMap;
use std::sync::Arc;

use evident_core::{CatalogId, ComplianceCatalog};
use parking_lot::RwLock;

use crate::index::ControlIndex;

/// A catalog with its control index, built once on insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedCatalog {
    catalog: ComplianceCatalog,
    controls: ControlIndex,
}

impl ScopedCatalog {
    pub fn new(catalog: ComplianceCatalog) -> Self {
        let controls = ControlIndex::build(&catalog);
        Self { catalog, controls }
    }

    pub fn catalog(&self) -> &ComplianceCatalog {
        &self.catalog
    }

    pub fn controls(&self) -> &ControlIndex {
        &self.controls
    }
}

/// Immutable `catalog id → catalog` map.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    catalogs: BTreeMap<CatalogId, Arc<ScopedCatalog>>,
}

impl Scope {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a scope from catalogs. A later catalog with the same id
    /// replaces an earlier one.
    pub fn from_catalogs(catalogs: impl IntoIterator<Item = ComplianceCatalog>) -> Self {
        let catalogs = catalogs
            .into_iter()
            .map(|c| (c.catalog_id.clone(), Arc::new(ScopedCatalog::new(c))))
            .collect();
        Self { catalogs }
    }

    /// A copy of this scope with `catalog` added or replaced.
    pub fn with_catalog(&self, catalog: ComplianceCatalog) -> Self {
        let mut catalogs = self.catalogs.clone();
        catalogs.insert(catalog.catalog_id.clone(), Arc::new(ScopedCatalog::new(catalog)));
        Self { catalogs }
    }

    pub fn get(&self, catalog_id: &CatalogId) -> Option<&ScopedCatalog> {
        self.catalogs.get(catalog_id).map(Arc::as_ref)
    }

    pub fn contains(&self, catalog_id: &CatalogId) -> bool {
        self.catalogs.contains_key(catalog_id)
    }

    pub fn catalog_ids(&self) -> impl Iterator<Item = &CatalogId> {
        self.catalogs.keys()
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}

/// Publishes [`Scope`] snapshots to concurrent readers.
///
/// The lock is held only to clone or swap the `Arc`, never across a
/// resolution or an `.await`.
#[derive(Debug, Default)]
pub struct ScopeHandle {
    current: RwLock<Arc<Scope>>,
}

impl ScopeHandle {
    pub fn new(scope: Scope) -> Self {
        Self {
            current: RwLock::new(Arc::new(scope)),
        }
    }

    /// The scope in force right now. Later replacements do not affect the
    /// returned snapshot.
    pub fn snapshot(&self) -> Arc<Scope> {
        Arc::clone(&self.current.read())
    }

    /// Replace the scope wholesale, returning the previous one.
    pub fn replace(&self, scope: Scope) -> Arc<Scope> {
        std::mem::replace(&mut *self.current.write(), Arc::new(scope))
    }

    /// Add or replace one catalog.
    pub fn insert_catalog(&self, catalog: ComplianceCatalog) {
        let mut guard = self.current.write();
        let next = guard.with_catalog(catalog);
        *guard = Arc::new(next);
    }
}
