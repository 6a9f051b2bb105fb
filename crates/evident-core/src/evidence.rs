//! # Evidence
//!
//! A policy evaluation as observed by an external engine: which rule ran,
//! which engine ran it, what the engine concluded and when.
//!
//! ## Outcome Vocabulary
//!
//! Engines report outcomes as free-form strings. [`EvaluationOutcome`]
//! parses the known vocabulary (`"Passed"`, `"Failed"`, `"Not Run"`,
//! `"Not Applicable"`, `"Needs Review"`, `"Unknown"`) and maps anything
//! else to [`EvaluationOutcome::Unknown`]. Parsing never fails.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::{EngineName, RuleId};

/// Identifies the origin and specific rule of a policy evaluation.
///
/// `rule_id` is the lookup and cache key. Uniqueness of a rule id within an
/// engine is assumed, not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyReference {
    pub engine_name: EngineName,
    pub rule_id: RuleId,
}

impl PolicyReference {
    pub fn new(engine_name: EngineName, rule_id: RuleId) -> Self {
        Self {
            engine_name,
            rule_id,
        }
    }
}

/// The result an engine reported for one policy rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvaluationOutcome {
    Passed,
    Failed,
    NotRun,
    NotApplicable,
    NeedsReview,
    Unknown,
}

impl EvaluationOutcome {
    /// All outcome variants.
    pub fn all() -> &'static [EvaluationOutcome] {
        &[
            Self::Passed,
            Self::Failed,
            Self::NotRun,
            Self::NotApplicable,
            Self::NeedsReview,
            Self::Unknown,
        ]
    }

    /// Parse an engine-reported outcome string. Unrecognised values yield
    /// [`EvaluationOutcome::Unknown`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Passed" => Self::Passed,
            "Failed" => Self::Failed,
            "Not Run" => Self::NotRun,
            "Not Applicable" => Self::NotApplicable,
            "Needs Review" => Self::NeedsReview,
            _ => Self::Unknown,
        }
    }

    /// The external string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "Passed",
            Self::Failed => "Failed",
            Self::NotRun => "Not Run",
            Self::NotApplicable => "Not Applicable",
            Self::NeedsReview => "Needs Review",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for EvaluationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EvaluationOutcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EvaluationOutcome {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// One observed policy evaluation. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub policy: PolicyReference,
    pub outcome: EvaluationOutcome,
    #[serde(default = "Utc::now")]
    pub observed_at: DateTime<Utc>,
}

impl Evidence {
    pub fn new(policy: PolicyReference, outcome: EvaluationOutcome) -> Self {
        Self {
            policy,
            outcome,
            observed_at: Utc::now(),
        }
    }

    pub fn rule_id(&self) -> &RuleId {
        &self.policy.rule_id
    }
}
