//! # Status Calculator
//!
//! Maps an engine-reported outcome to a compliance verdict. Total, pure and
//! constant time. Verdicts are never cached: they are recomputed from the
//! evidence on every enrichment.

use serde::{Deserialize, Serialize};

use crate::evidence::{EvaluationOutcome, Evidence};

/// Normalised compliance verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceVerdict {
    Compliant,
    NonCompliant,
    NotApplicable,
    Unknown,
}

impl ComplianceVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "COMPLIANT",
            Self::NonCompliant => "NON_COMPLIANT",
            Self::NotApplicable => "NOT_APPLICABLE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for ComplianceVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EvaluationOutcome> for ComplianceVerdict {
    fn from(outcome: EvaluationOutcome) -> Self {
        match outcome {
            EvaluationOutcome::Passed => Self::Compliant,
            EvaluationOutcome::Failed => Self::NonCompliant,
            EvaluationOutcome::NotRun | EvaluationOutcome::NotApplicable => Self::NotApplicable,
            EvaluationOutcome::NeedsReview | EvaluationOutcome::Unknown => Self::Unknown,
        }
    }
}

/// Derive the verdict for one piece of evidence.
pub fn calculate(evidence: &Evidence) -> ComplianceVerdict {
    ComplianceVerdict::from(evidence.outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::PolicyReference;
    use crate::identity::{EngineName, RuleId};
    use proptest::prelude::*;

    fn evidence(rule: &str, outcome: EvaluationOutcome) -> Evidence {
        Evidence::new(
            PolicyReference::new(EngineName::new("opa").unwrap(), RuleId::new(rule).unwrap()),
            outcome,
        )
    }

    #[test]
    fn outcome_table() {
        let cases = [
            (EvaluationOutcome::Passed, ComplianceVerdict::Compliant),
            (EvaluationOutcome::Failed, ComplianceVerdict::NonCompliant),
            (EvaluationOutcome::NotRun, ComplianceVerdict::NotApplicable),
            (EvaluationOutcome::NotApplicable, ComplianceVerdict::NotApplicable),
            (EvaluationOutcome::NeedsReview, ComplianceVerdict::Unknown),
            (EvaluationOutcome::Unknown, ComplianceVerdict::Unknown),
        ];
        for (outcome, expected) in cases {
            assert_eq!(calculate(&evidence("AC-1", outcome)), expected, "{outcome}");
        }
    }

    #[test]
    fn verdict_wire_names() {
        assert_eq!(
            serde_json::to_string(&ComplianceVerdict::NonCompliant).unwrap(),
            "\"NON_COMPLIANT\""
        );
        assert_eq!(ComplianceVerdict::NotApplicable.to_string(), "NOT_APPLICABLE");
    }

    proptest! {
        #[test]
        fn passed_is_always_compliant(rule in "[A-Za-z0-9-]{1,24}") {
            prop_assert_eq!(
                calculate(&evidence(&rule, EvaluationOutcome::Passed)),
                ComplianceVerdict::Compliant
            );
        }

        #[test]
        fn arbitrary_strings_never_panic(raw in ".*") {
            let verdict = ComplianceVerdict::from(EvaluationOutcome::parse(&raw));
            let known = ["Passed", "Failed", "Not Run", "Not Applicable"];
            if !known.contains(&raw.trim()) {
                prop_assert_eq!(verdict, ComplianceVerdict::Unknown);
            }
        }
    }
}
