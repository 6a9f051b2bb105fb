//! # Wire Contract
//!
//! Request and response envelopes of the metadata service. The HTTP server
//! in `evident-api` produces them and the HTTP client in `evident-client`
//! consumes them, so both sides share one definition.
//!
//! All field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::enrichment::EnrichedResult;
use crate::error::ValidationError;
use crate::evidence::{Evidence, PolicyReference};
use crate::identity::RuleId;
use crate::metadata::EnrichmentOutcome;

// -- Single lookup -----------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRequest {
    pub policy: PolicyReference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataResponse {
    pub compliance: EnrichmentOutcome,
}

// -- Batch lookup ------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchMetadataRequest {
    pub policies: Vec<PolicyReference>,
}

pub fn validate_batch_size(len: usize, max: usize) -> Result<(), ValidationError> {
    if len == 0 {
        return Err(ValidationError::EmptyBatch);
    }
    if len > max {
        return Err(ValidationError::BatchTooLarge { len, max });
    }
    Ok(())
}

/// Result for one item of a batch. Exactly one of `compliance` and `error`
/// is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResult {
    pub index: usize,
    pub policy_rule_id: RuleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance: Option<EnrichmentOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchItemResult {
    pub fn resolved(index: usize, policy_rule_id: RuleId, compliance: EnrichmentOutcome) -> Self {
        Self {
            index,
            policy_rule_id,
            compliance: Some(compliance),
            error: None,
        }
    }

    pub fn failed(index: usize, policy_rule_id: RuleId, error: impl Into<String>) -> Self {
        Self {
            index,
            policy_rule_id,
            compliance: None,
            error: Some(error.into()),
        }
    }
}

/// `success` counts items that produced any outcome, unmapped included.
/// `failed` counts items that produced none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[BatchItemResult]) -> Self {
        let success = results.iter().filter(|r| r.compliance.is_some()).count();
        Self {
            total: results.len(),
            success,
            failed: results.len() - success,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchMetadataResponse {
    pub results: Vec<BatchItemResult>,
    pub summary: BatchSummary,
}

// -- Enrichment --------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichRequest {
    pub evidence: Evidence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichResponse {
    pub result: EnrichedResult,
}
