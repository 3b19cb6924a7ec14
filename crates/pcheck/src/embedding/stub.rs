//! Deterministic stub embedder (no network, no model).

use async_trait::async_trait;
use tracing::debug;

use super::error::EmbeddingError;
use super::provider::EmbeddingProvider;
use crate::constants::DEFAULT_EMBEDDING_DIM;

/// Produces unit-length pseudo-random vectors seeded by a BLAKE3 hash of the text.
///
/// Equal inputs always embed to equal vectors, so identical phrases have distance `0`;
/// unrelated inputs land near-orthogonal. Useful for local runs and tests only.
#[derive(Debug, Clone)]
pub struct StubEmbedder {
    embedding_dim: usize,
}

impl StubEmbedder {
    /// Creates a stub emitting `embedding_dim`-length vectors.
    pub fn new(embedding_dim: usize) -> Self {
        Self { embedding_dim }
    }

    /// Returns the configured output dimension.
    pub fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }

    pub(crate) fn vector_for(text: &str, embedding_dim: usize) -> Vec<f32> {
        let hash = blake3::hash(text.as_bytes());
        let mut seed_bytes = [0u8; 8];
        seed_bytes.copy_from_slice(&hash.as_bytes()[..8]);
        let mut state = u64::from_le_bytes(seed_bytes);

        let mut embedding = Vec::with_capacity(embedding_dim);
        for _ in 0..embedding_dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut embedding {
                *x /= norm;
            }
        }

        embedding
    }
}

impl Default for StubEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_DIM)
    }
}

#[async_trait]
impl EmbeddingProvider for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        debug!(text_len = text.len(), "Generating stub embedding");
        Ok(Self::vector_for(text, self.embedding_dim))
    }

    fn name(&self) -> &'static str {
        "stub"
    }

    fn is_stub(&self) -> bool {
        true
    }
}
