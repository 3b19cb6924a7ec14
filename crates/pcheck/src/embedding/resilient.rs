//! Uniform timeout + retry wrapper for embedding providers.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::error::EmbeddingError;
use super::provider::EmbeddingProvider;
use crate::config::Config;
use crate::constants::{DEFAULT_EMBED_MAX_RETRIES, DEFAULT_EMBED_TIMEOUT_MS};

/// Default delay before the first retry; later retries wait a multiple of it.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq, Eq)]
/// Timeout and retry settings applied to every embedding call.
pub struct RetryPolicy {
    /// Timeout per attempt.
    pub timeout: Duration,
    /// Retries after the first attempt (`0` disables retrying).
    pub max_retries: u32,
    /// Base backoff; attempt `n` waits `n * backoff`.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_EMBED_TIMEOUT_MS),
            max_retries: DEFAULT_EMBED_MAX_RETRIES,
            backoff: DEFAULT_RETRY_BACKOFF,
        }
    }
}

impl RetryPolicy {
    /// Reads timeout and retry count from [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self {
            timeout: config.embed_timeout,
            max_retries: config.embed_max_retries,
            ..Default::default()
        }
    }
}

/// Wraps a provider so every call is bounded by [`RetryPolicy::timeout`] and retryable
/// failures are attempted again.
pub struct ResilientEmbedder {
    inner: Arc<dyn EmbeddingProvider>,
    policy: RetryPolicy,
}

impl ResilientEmbedder {
    pub fn new(inner: Arc<dyn EmbeddingProvider>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

impl std::fmt::Debug for ResilientEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResilientEmbedder")
            .field("inner", &self.inner.name())
            .field("policy", &self.policy)
            .finish()
    }
}

#[async_trait]
impl EmbeddingProvider for ResilientEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;

            let result =
                match tokio::time::timeout(self.policy.timeout, self.inner.embed(text)).await {
                    Ok(res) => res,
                    Err(_) => Err(EmbeddingError::Timeout {
                        timeout: self.policy.timeout,
                    }),
                };

            match result {
                Ok(vector) => return Ok(vector),
                Err(err) if err.is_retryable() && attempt <= self.policy.max_retries => {
                    warn!(
                        provider = self.inner.name(),
                        attempt,
                        max_retries = self.policy.max_retries,
                        error = %err,
                        "Embedding attempt failed, retrying"
                    );
                    tokio::time::sleep(self.policy.backoff * attempt).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn is_stub(&self) -> bool {
        self.inner.is_stub()
    }
}
