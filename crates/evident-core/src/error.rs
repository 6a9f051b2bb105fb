//! # Validation Errors
//!
//! Malformed input is rejected before any processing begins. Everything in
//! this module describes input that is structurally unusable; an unmapped
//! policy rule is a valid outcome and never appears here.

use thiserror::Error;

/// Errors raised while validating inbound identifiers, evidence and batches.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// An identifier was empty or whitespace-only.
    #[error("{kind} must not be empty")]
    EmptyIdentifier {
        /// The identifier kind, e.g. "rule id".
        kind: &'static str,
    },

    /// A batch request carried no policy references.
    #[error("at least one policy rule is required")]
    EmptyBatch,

    /// A batch request exceeded the configured maximum size.
    #[error("batch of {len} policy rules exceeds the maximum of {max}")]
    BatchTooLarge {
        /// Number of items submitted.
        len: usize,
        /// Configured maximum.
        max: usize,
    },

    /// An evidence record lacked a required attribute.
    #[error("missing required attribute: {name}")]
    MissingAttribute {
        /// The attribute key that was absent or empty.
        name: String,
    },
}
