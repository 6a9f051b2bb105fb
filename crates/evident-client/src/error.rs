//! Metadata client error types.

use evident_core::RuleId;

/// Errors from fetching compliance metadata.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The metadata service returned a non-2xx status.
    #[error("metadata service {endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The batch response carried no result for the requested rule.
    #[error("no metadata returned for policy rule {rule_id}")]
    MissingResult { rule_id: RuleId },
    /// The batch response carried an error for the requested rule.
    #[error("error fetching metadata for policy rule {rule_id}: {message}")]
    Item { rule_id: RuleId, message: String },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}
