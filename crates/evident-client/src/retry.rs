//! Backoff for transport failures when calling the metadata service.
//!
//! Only `reqwest` send errors are retried. A response with any status, or a
//! body that fails to decode, goes back to the caller on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::config::ClientConfig;

/// How many times a failed send is repeated, and how long to wait first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
        }
    }

    /// Wait before retry `retry` (zero-based). Doubles each time.
    fn delay_for(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Run `send` until it yields a response or the retries run out.
    ///
    /// `send` is invoked at most `max_retries + 1` times. `endpoint` and
    /// `batch_size` only label the log events.
    pub async fn send<F, Fut>(
        &self,
        endpoint: &str,
        batch_size: usize,
        send: F,
    ) -> Result<reqwest::Response, reqwest::Error>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        let mut retry = 0;
        loop {
            match send().await {
                Ok(resp) => return Ok(resp),
                Err(e) if retry < self.max_retries => {
                    let delay = self.delay_for(retry);
                    retry += 1;
                    tracing::warn!(
                        endpoint,
                        batch_size,
                        retry,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "metadata request transport failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
