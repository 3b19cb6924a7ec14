use std::sync::Arc;

use tracing::{info, warn};

use super::azure::AzureOpenAiEmbedder;
use super::error::EmbeddingError;
use super::provider::EmbeddingProvider;
use super::resilient::{ResilientEmbedder, RetryPolicy};
use super::stub::StubEmbedder;
use crate::config::Config;

/// Builds the configured [`EmbeddingProvider`], wrapped in a [`ResilientEmbedder`].
///
/// Without `PCHECK_AOAI_ENDPOINT` the deterministic [`StubEmbedder`] is used.
pub fn build_embedder(config: &Config) -> Result<Arc<dyn EmbeddingProvider>, EmbeddingError> {
    let inner: Arc<dyn EmbeddingProvider> = if config.has_embedding_endpoint() {
        let embedder = AzureOpenAiEmbedder::from_config(config)?;
        info!(
            url = embedder.url(),
            deployment = %config.embedding_deployment,
            "Using Azure OpenAI embedding provider"
        );
        Arc::new(embedder)
    } else {
        warn!("No PCHECK_AOAI_ENDPOINT configured, running embedder in stub mode");
        Arc::new(StubEmbedder::new(config.embedding_dim))
    };

    Ok(Arc::new(ResilientEmbedder::new(
        inner,
        RetryPolicy::from_config(config),
    )))
}
