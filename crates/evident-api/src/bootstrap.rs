//! # Bootstrap
//!
//! Builds [`AppState`] from a [`ServiceConfig`]: loads every catalog into
//! the initial scope and registers every plan file with the plan store.

use std::sync::Arc;

use evident_mapper::{load_catalogs, load_plans, LoadError, PlanStore, Scope};

use crate::config::ServiceConfig;
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Load(#[from] LoadError),
}

pub fn bootstrap(config: &ServiceConfig) -> Result<AppState, BootstrapError> {
    let catalogs = load_catalogs(&config.catalogs)?;
    let scope = Scope::from_catalogs(catalogs);

    let plans = Arc::new(PlanStore::new());
    for source in &config.plans {
        let loaded = load_plans(&source.path)?;
        if !scope.contains(&source.catalog_id) {
            tracing::warn!(
                catalog_id = %source.catalog_id,
                path = %source.path.display(),
                "plans registered for a catalog that is not in scope"
            );
        }
        plans.register_plan(source.catalog_id.clone(), loaded);
    }

    tracing::info!(
        catalogs = scope.len(),
        plan_version = plans.version(),
        max_batch_size = config.max_batch_size,
        "bootstrap complete"
    );

    Ok(AppState::with_basic_resolver(scope, plans).with_max_batch_size(config.max_batch_size))
}
