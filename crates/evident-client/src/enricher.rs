//! # Attribute-Record Enricher
//!
//! Evidence travels as key/value attribute records (log records in a
//! telemetry pipeline). The enricher reads the policy attributes, retrieves
//! compliance context through a [`CachedMetadataClient`] and writes the
//! `compliance.*` attributes back onto the same record.
//!
//! A record that cannot be enriched is left as it was. It is never dropped.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use evident_core::{
    EngineName, EnrichedResult, EvaluationOutcome, Evidence, PolicyReference, RuleId,
    ValidationError,
};
use serde::{Deserialize, Serialize};

use crate::cacheable::CachedMetadataClient;

// -- Attribute keys ----------------------------------------------------------

pub const POLICY_RULE_ID: &str = "policy.rule.id";
pub const POLICY_ENGINE_NAME: &str = "policy.engine.name";
pub const POLICY_EVALUATION_RESULT: &str = "policy.evaluation.result";

pub const COMPLIANCE_STATUS: &str = "compliance.status";
pub const COMPLIANCE_CONTROL_ID: &str = "compliance.control.id";
pub const COMPLIANCE_CONTROL_CATALOG_ID: &str = "compliance.control.catalog.id";
pub const COMPLIANCE_CONTROL_CATEGORY: &str = "compliance.control.category";
pub const COMPLIANCE_REQUIREMENTS: &str = "compliance.requirements";
pub const COMPLIANCE_FRAMEWORKS: &str = "compliance.frameworks";
pub const COMPLIANCE_ENRICHMENT_STATUS: &str = "compliance.enrichment.status";
pub const COMPLIANCE_REMEDIATION_DESCRIPTION: &str = "compliance.remediation.description";

// -- Records -----------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Str(String),
    List(Vec<String>),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::List(_) => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// One evidence record with its attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl AttributeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AttributeValue::as_str)
    }

    pub fn put(&mut self, key: &str, value: impl Into<AttributeValue>) {
        self.attributes.insert(key.to_string(), value.into());
    }

    fn require(&self, key: &str) -> Result<&str, ValidationError> {
        self.get_str(key)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ValidationError::MissingAttribute {
                name: key.to_string(),
            })
    }
}

/// Read the evidence carried by `record`.
///
/// # Errors
///
/// Returns [`ValidationError::MissingAttribute`] if the rule id, engine name
/// or evaluation result is absent, empty or not a string.
pub fn extract_evidence(record: &AttributeRecord) -> Result<Evidence, ValidationError> {
    let rule_id = RuleId::new(record.require(POLICY_RULE_ID)?)?;
    let engine_name = EngineName::new(record.require(POLICY_ENGINE_NAME)?)?;
    let outcome = EvaluationOutcome::parse(record.require(POLICY_EVALUATION_RESULT)?);

    Ok(Evidence {
        policy: PolicyReference::new(engine_name, rule_id),
        outcome,
        observed_at: record.timestamp.unwrap_or_else(Utc::now),
    })
}

/// Write the `compliance.*` attributes for `result` onto `record`.
pub fn apply_enrichment(record: &mut AttributeRecord, result: &EnrichedResult) {
    let metadata = &result.metadata;
    record.put(COMPLIANCE_STATUS, result.verdict.as_str());
    record.put(COMPLIANCE_CONTROL_ID, metadata.control_id.as_str());
    record.put(COMPLIANCE_CONTROL_CATALOG_ID, metadata.catalog_id.as_str());
    record.put(COMPLIANCE_CONTROL_CATEGORY, metadata.category.as_str());
    record.put(COMPLIANCE_REQUIREMENTS, metadata.requirements.clone());
    record.put(COMPLIANCE_FRAMEWORKS, metadata.frameworks.clone());
    record.put(COMPLIANCE_ENRICHMENT_STATUS, result.enrichment_status.as_str());
    if let Some(remediation) = &metadata.remediation_description {
        record.put(COMPLIANCE_REMEDIATION_DESCRIPTION, remediation.as_str());
    }
}

/// Counts from one [`Enricher::process`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnrichmentSummary {
    pub total: usize,
    pub enriched: usize,
    pub skipped_invalid: usize,
    pub failed: usize,
}

#[derive(Debug, Clone)]
pub struct Enricher {
    client: CachedMetadataClient,
}

impl Enricher {
    pub fn new(client: CachedMetadataClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &CachedMetadataClient {
        &self.client
    }

    /// Enrich every record in place. Records that fail extraction or
    /// retrieval are left untouched.
    pub async fn process(&self, records: &mut [AttributeRecord]) -> EnrichmentSummary {
        let mut summary = EnrichmentSummary {
            total: records.len(),
            ..EnrichmentSummary::default()
        };

        for record in records.iter_mut() {
            let evidence = match extract_evidence(record) {
                Ok(evidence) => evidence,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping record without policy evidence");
                    summary.skipped_invalid += 1;
                    continue;
                }
            };

            match self.client.retrieve(&evidence).await {
                Ok(result) => {
                    apply_enrichment(record, &result);
                    summary.enriched += 1;
                }
                Err(e) => {
                    tracing::error!(
                        rule_id = %evidence.rule_id(),
                        error = %e,
                        "failed to enrich record, leaving it unenriched"
                    );
                    summary.failed += 1;
                }
            }
        }

        summary
    }
}
