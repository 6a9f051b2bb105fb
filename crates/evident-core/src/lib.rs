//! # evident-core — Foundational Types for Evidence Enrichment
//!
//! This crate is the bedrock of the evidence enrichment workspace. It defines
//! the vocabulary every other crate speaks: policy references, evidence,
//! compliance catalogs, assessment plans, compliance metadata and the
//! service wire contract.
//!
//! ## Crate Policy
//!
//! - Depends only on `serde`, `serde_json`, `thiserror` and `chrono`.
//!   No I/O, no async runtime, no logging.
//! - Identifiers are validated newtypes. A `RuleId` can never be confused
//!   with a `CatalogId` at the type level, and neither can be empty.
//! - The status calculator is a total pure function. Unrecognised
//!   evaluation outcomes degrade to [`ComplianceVerdict::Unknown`] instead
//!   of failing.
//! - Static metadata ([`EnrichmentOutcome`]) and dynamic status
//!   ([`ComplianceVerdict`]) are separate types. They meet only in
//!   [`combine`], which is the boundary caching stops at.

pub mod catalog;
pub mod enrichment;
pub mod error;
pub mod evidence;
pub mod identity;
pub mod metadata;
pub mod status;
pub mod wire;

pub use catalog::{
    AssessmentPlan, ComplianceCatalog, Control, ControlFamily, MappingEntry, Procedure,
    Requirement, StandardMapping,
};
pub use enrichment::{combine, EnrichedResult};
pub use error::ValidationError;
pub use evidence::{EvaluationOutcome, Evidence, PolicyReference};
pub use identity::{CatalogId, EngineName, RuleId};
pub use metadata::{ComplianceMetadata, EnrichmentOutcome, EnrichmentStatus};
pub use status::{calculate, ComplianceVerdict};
