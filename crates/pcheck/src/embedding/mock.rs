use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::error::EmbeddingError;
use super::provider::EmbeddingProvider;
use super::stub::StubEmbedder;

#[derive(Clone)]
/// In-memory embedding provider with scripted vectors and failures.
///
/// Texts without a scripted vector fall back to the [`StubEmbedder`] vector of the
/// configured dimension.
pub struct MockEmbedder {
    embedding_dim: usize,
    vectors: Arc<RwLock<HashMap<String, Vec<f32>>>>,
    failures: Arc<RwLock<HashMap<String, EmbeddingError>>>,
    calls: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl MockEmbedder {
    /// Creates a mock emitting `embedding_dim`-length fallback vectors.
    pub fn new(embedding_dim: usize) -> Self {
        Self {
            embedding_dim,
            vectors: Arc::new(RwLock::new(HashMap::new())),
            failures: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(AtomicUsize::new(0)),
            delay: None,
        }
    }

    /// Returns `vector` whenever `text` is embedded.
    pub fn with_vector(self, text: &str, vector: Vec<f32>) -> Self {
        self.set_vector(text, vector);
        self
    }

    /// Fails with `error` whenever `text` is embedded.
    pub fn with_failure(self, text: &str, error: EmbeddingError) -> Self {
        self.failures.write().insert(text.to_string(), error);
        self
    }

    /// Sleeps for `delay` before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Replaces the scripted vector for `text`.
    pub fn set_vector(&self, text: &str, vector: Vec<f32>) {
        self.vectors.write().insert(text.to_string(), vector);
    }

    /// Number of `embed` calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.failures.read().get(text) {
            return Err(err.clone());
        }

        if let Some(vector) = self.vectors.read().get(text) {
            return Ok(vector.clone());
        }

        Ok(StubEmbedder::vector_for(text, self.embedding_dim))
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn is_stub(&self) -> bool {
        true
    }
}
