//! The outbound metadata seam.

use async_trait::async_trait;
use evident_core::wire::BatchItemResult;
use evident_core::{EnrichmentOutcome, PolicyReference};

use crate::error::ClientError;

/// A source of compliance metadata, typically a remote service.
///
/// `fetch_metadata` defaults to a one-element batch, which is how the
/// remote service is addressed.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetch metadata for several policies in one request. The result
    /// carries one entry per input item, in input order.
    async fn fetch_metadata_batch(
        &self,
        policies: &[PolicyReference],
    ) -> Result<Vec<BatchItemResult>, ClientError>;

    /// Fetch metadata for a single policy.
    async fn fetch_metadata(
        &self,
        policy: &PolicyReference,
    ) -> Result<EnrichmentOutcome, ClientError> {
        let results = self
            .fetch_metadata_batch(std::slice::from_ref(policy))
            .await?;
        single_outcome(policy, results)
    }
}

/// Extract the outcome for `policy` from a one-element batch response.
pub(crate) fn single_outcome(
    policy: &PolicyReference,
    results: Vec<BatchItemResult>,
) -> Result<EnrichmentOutcome, ClientError> {
    let Some(result) = results.into_iter().next() else {
        return Err(ClientError::MissingResult {
            rule_id: policy.rule_id.clone(),
        });
    };
    if let Some(message) = result.error {
        return Err(ClientError::Item {
            rule_id: policy.rule_id.clone(),
            message,
        });
    }
    result.compliance.ok_or_else(|| ClientError::MissingResult {
        rule_id: policy.rule_id.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use evident_core::{EngineName, RuleId};

    fn policy() -> PolicyReference {
        PolicyReference::new(EngineName::new("opa").unwrap(), RuleId::new("AC-1").unwrap())
    }

    #[test]
    fn empty_results_is_missing() {
        let err = single_outcome(&policy(), vec![]).unwrap_err();
        assert!(matches!(err, ClientError::MissingResult { .. }));
    }

    #[test]
    fn item_error_surfaces_message() {
        let p = policy();
        let err = single_outcome(&p, vec![BatchItemResult::failed(0, p.rule_id.clone(), "boom")])
            .unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn absent_compliance_is_missing() {
        let p = policy();
        let result = BatchItemResult {
            index: 0,
            policy_rule_id: p.rule_id.clone(),
            compliance: None,
            error: None,
        };
        assert!(matches!(
            single_outcome(&p, vec![result]),
            Err(ClientError::MissingResult { .. })
        ));
    }

    #[test]
    fn resolved_result_is_returned() {
        let p = policy();
        let outcome = EnrichmentOutcome::unmapped(&p.rule_id);
        let got = single_outcome(
            &p,
            vec![BatchItemResult::resolved(0, p.rule_id.clone(), outcome.clone())],
        )
        .unwrap();
        assert_eq!(got, outcome);
    }
}
