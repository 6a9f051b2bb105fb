//! # Application State
//!
//! Shared state for the Axum application, passed to handlers via the
//! `State` extractor. Everything is behind `Arc`, so cloning is cheap.
//!
//! - **Resolvers**: per-engine resolver selection with the basic fallback.
//! - **Scope**: catalogs in force, published as snapshots.
//! - **Plans**: the versioned plan store shared with the basic resolver.

use std::sync::Arc;

use evident_mapper::{BasicResolver, PlanStore, ResolverSet, Scope, ScopeHandle};

use crate::config::DEFAULT_MAX_BATCH_SIZE;

/// Service version reported by the readiness probe.
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone)]
pub struct AppState {
    pub resolvers: Arc<ResolverSet>,
    pub scope: Arc<ScopeHandle>,
    pub plans: Arc<PlanStore>,
    pub max_batch_size: usize,
}

impl AppState {
    pub fn new(
        resolvers: ResolverSet,
        scope: Arc<ScopeHandle>,
        plans: Arc<PlanStore>,
        max_batch_size: usize,
    ) -> Self {
        Self {
            resolvers: Arc::new(resolvers),
            scope,
            plans,
            max_batch_size,
        }
    }

    /// State with only the basic resolver, reading from `plans`.
    pub fn with_basic_resolver(scope: Scope, plans: Arc<PlanStore>) -> Self {
        let basic = BasicResolver::with_store(Arc::clone(&plans));
        Self::new(
            ResolverSet::new(Arc::new(basic)),
            Arc::new(ScopeHandle::new(scope)),
            plans,
            DEFAULT_MAX_BATCH_SIZE,
        )
    }

    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }
}
