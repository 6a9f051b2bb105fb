//! Metadata client configuration.
//!
//! Loaded from a YAML (or JSON) document.
//! The bearer token is held in [`Zeroizing`] so it is wiped from memory on
//! drop, and the `Debug` output redacts it.

use std::path::Path;

use evident_core::PolicyReference;
use serde::{Deserialize, Deserializer};
use url::Url;
use zeroize::Zeroizing;

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retries after a transport failure.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default wait before the first retry. Doubles on each further retry.
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 200;

/// Default number of rule ids per prefetch batch request.
pub const DEFAULT_PREFETCH_BATCH_SIZE: usize = 50;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_retry_base_delay_ms() -> u64 {
    DEFAULT_RETRY_BASE_DELAY_MS
}

fn default_prefetch_batch_size() -> usize {
    DEFAULT_PREFETCH_BATCH_SIZE
}

fn deserialize_token<'de, D>(deserializer: D) -> Result<Option<Zeroizing<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|t| !t.trim().is_empty()).map(Zeroizing::new))
}

/// Configuration for connecting to a remote metadata service.
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the metadata service.
    pub endpoint: Url,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Optional bearer token sent on every request.
    #[serde(default, deserialize_with = "deserialize_token")]
    pub api_token: Option<Zeroizing<String>>,
    /// Retries after a transport failure. Zero disables retrying.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Wait before the first retry, in milliseconds.
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    /// Rule ids per prefetch batch request.
    #[serde(default = "default_prefetch_batch_size")]
    pub prefetch_batch_size: usize,
    /// Policies to prefetch at start-up.
    #[serde(default)]
    pub prefetch: Vec<PolicyReference>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("max_retries", &self.max_retries)
            .field("retry_base_delay_ms", &self.retry_base_delay_ms)
            .field("prefetch_batch_size", &self.prefetch_batch_size)
            .field("prefetch", &self.prefetch.len())
            .finish()
    }
}

impl ClientConfig {
    /// A configuration for `endpoint` with every other field defaulted.
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_token: None,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
            prefetch_batch_size: DEFAULT_PREFETCH_BATCH_SIZE,
            prefetch: Vec::new(),
        }
    }

    /// Load and validate a YAML or JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be greater than zero".into(),
            });
        }
        if self.prefetch_batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "prefetch_batch_size",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error("failed to read {path}: {reason}")]
    Read { path: String, reason: String },
    #[error("failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },
    #[error("invalid API token header value")]
    InvalidToken,
}
