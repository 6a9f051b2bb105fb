//! HTTP implementation of [`MetadataSource`].
//!
//! ## Endpoint
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | POST | `/v1/metadata/batch` | `{ "policies": [PolicyReference] }` |
//!
//! Single lookups go through the same endpoint as a one-element batch.

use std::time::Duration;

use async_trait::async_trait;
use evident_core::wire::{BatchItemResult, BatchMetadataRequest, BatchMetadataResponse};
use evident_core::PolicyReference;
use url::Url;

use crate::config::{ClientConfig, ConfigError};
use crate::error::ClientError;
use crate::retry::RetryPolicy;
use crate::source::MetadataSource;

/// Path of the batch metadata endpoint, relative to the base URL.
const BATCH_PATH: &str = "v1/metadata/batch";

#[derive(Debug, Clone)]
pub struct HttpMetadataClient {
    http: reqwest::Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl HttpMetadataClient {
    /// Create a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = &config.api_token {
            let value = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                .map_err(|_| ClientError::Config(ConfigError::InvalidToken))?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.endpoint.clone(),
            retry: RetryPolicy::from_config(config),
        })
    }

    fn batch_url(&self) -> String {
        format!("{}/{BATCH_PATH}", self.base_url.as_str().trim_end_matches('/'))
    }
}

#[async_trait]
impl MetadataSource for HttpMetadataClient {
    /// Calls `POST {base_url}/v1/metadata/batch`.
    async fn fetch_metadata_batch(
        &self,
        policies: &[PolicyReference],
    ) -> Result<Vec<BatchItemResult>, ClientError> {
        let endpoint = "POST /v1/metadata/batch";
        let url = self.batch_url();
        let req = BatchMetadataRequest {
            policies: policies.to_vec(),
        };

        let resp = self
            .retry
            .send(endpoint, policies.len(), || self.http.post(&url).json(&req).send())
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        let body: BatchMetadataResponse =
            resp.json().await.map_err(|e| ClientError::Deserialization {
                endpoint: endpoint.into(),
                source: e,
            })?;

        tracing::debug!(
            requested = policies.len(),
            returned = body.results.len(),
            success = body.summary.success,
            "batch metadata response"
        );
        Ok(body.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_url_handles_trailing_slash() {
        let mut config = ClientConfig::new(Url::parse("http://localhost:8081/").unwrap());
        let client = HttpMetadataClient::new(&config).unwrap();
        assert_eq!(client.batch_url(), "http://localhost:8081/v1/metadata/batch");

        config.endpoint = Url::parse("http://localhost:8081/compass").unwrap();
        let client = HttpMetadataClient::new(&config).unwrap();
        assert_eq!(client.batch_url(), "http://localhost:8081/compass/v1/metadata/batch");
    }
}
