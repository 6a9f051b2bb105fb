//! # evident-mapper — Compliance Metadata Resolution
//!
//! Resolves a policy rule id to static compliance metadata by joining two
//! externally authored documents:
//!
//! ```text
//!   rule id ──▶ procedure (assessment plan) ──▶ control (catalog) ──▶ metadata
//! ```
//!
//! ## Moving Parts
//!
//! - [`PlanStore`]: append-only, versioned registry of assessment plans per
//!   catalog. Each registration rebuilds that catalog's procedure index once
//!   and publishes a new immutable [`PlanSnapshot`].
//! - [`ScopeHandle`]: the set of catalogs currently in force, published as
//!   immutable [`Scope`] snapshots and replaced wholesale on reload.
//! - [`MetadataResolver`]: the plugin seam. [`BasicResolver`] is the baseline
//!   implementation, and [`ResolverSet`] selects one per policy engine with a
//!   mandatory fallback.
//!
//! ## Concurrency
//!
//! Readers take an `Arc` snapshot of plans and scope at the start of a
//! resolution and never observe a partially updated catalog. Writers build a
//! new snapshot off to the side and swap it in under a short write lock.
//!
//! ## Unmapped Is Not an Error
//!
//! Every lookup miss degrades to [`EnrichmentOutcome::unmapped`]. The reasons
//! are emitted as `trace` events and never reach the caller.
//!
//! [`EnrichmentOutcome::unmapped`]: evident_core::EnrichmentOutcome::unmapped

pub mod basic;
pub mod error;
pub mod index;
pub mod loader;
pub mod plans;
pub mod registry;
pub mod resolver;
pub mod scope;

pub use basic::BasicResolver;
pub use error::{LoadError, RegistryError};
pub use index::{ControlEntry, ControlIndex, ProcedureEntry, ProcedureIndex};
pub use loader::{load_catalog, load_catalogs, load_plans};
pub use plans::{CatalogPlans, PlanSnapshot, PlanStore};
pub use registry::ResolverSet;
pub use resolver::MetadataResolver;
pub use scope::{Scope, ScopeHandle, ScopedCatalog};
