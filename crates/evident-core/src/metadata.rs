//! # Compliance Metadata
//!
//! Static compliance context resolved for a policy rule. Metadata depends
//! only on the rule id, the scope and the registered plans. It never depends
//! on evidence content, which is what makes it safe to cache indefinitely.

use serde::{Deserialize, Serialize};

use crate::identity::RuleId;

/// Category reported for rules no catalog maps.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Catalog id reported for rules no catalog maps.
pub const UNKNOWN_CATALOG: &str = "unknown";

/// Control, catalog and framework context for one policy rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceMetadata {
    pub control_id: String,
    pub category: String,
    pub catalog_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation_description: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub frameworks: Vec<String>,
}

/// Whether resolution found a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentStatus {
    Success,
    Unmapped,
}

impl EnrichmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Unmapped => "unmapped",
        }
    }
}

impl std::fmt::Display for EnrichmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolver output: the cacheable half of an enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentOutcome {
    pub enrichment_status: EnrichmentStatus,
    pub metadata: ComplianceMetadata,
}

impl EnrichmentOutcome {
    pub fn success(metadata: ComplianceMetadata) -> Self {
        Self {
            enrichment_status: EnrichmentStatus::Success,
            metadata,
        }
    }

    /// The fallback for a rule no catalog in scope maps. The rule id stands
    /// in for the control id.
    pub fn unmapped(rule_id: &RuleId) -> Self {
        Self {
            enrichment_status: EnrichmentStatus::Unmapped,
            metadata: ComplianceMetadata {
                control_id: rule_id.as_str().to_string(),
                category: UNKNOWN_CATEGORY.to_string(),
                catalog_id: UNKNOWN_CATALOG.to_string(),
                remediation_description: None,
                requirements: Vec::new(),
                frameworks: Vec::new(),
            },
        }
    }

    pub fn is_mapped(&self) -> bool {
        self.enrichment_status == EnrichmentStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmapped_uses_rule_id_as_control() {
        let rule = RuleId::new("custom-rule").unwrap();
        let outcome = EnrichmentOutcome::unmapped(&rule);
        assert_eq!(outcome.enrichment_status, EnrichmentStatus::Unmapped);
        assert_eq!(outcome.metadata.control_id, "custom-rule");
        assert_eq!(outcome.metadata.category, "Unknown");
        assert_eq!(outcome.metadata.catalog_id, "unknown");
        assert!(outcome.metadata.requirements.is_empty());
        assert!(outcome.metadata.frameworks.is_empty());
        assert!(!outcome.is_mapped());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&EnrichmentStatus::Unmapped).unwrap(),
            "\"unmapped\""
        );
    }

    #[test]
    fn remediation_omitted_when_absent() {
        let rule = RuleId::new("r").unwrap();
        let json = serde_json::to_value(EnrichmentOutcome::unmapped(&rule)).unwrap();
        assert!(json["metadata"].get("remediationDescription").is_none());
        assert_eq!(json["enrichmentStatus"], "unmapped");
    }
}
