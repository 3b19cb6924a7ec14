use async_trait::async_trait;

use super::error::EmbeddingError;

#[async_trait]
/// Converts text into a fixed-length embedding vector.
///
/// Implementations must return vectors of a single dimensionality for the lifetime of a
/// deployment. Callers assert the dimension; providers only report what they received.
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds `text`.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Short provider name used in logs and readiness output.
    fn name(&self) -> &'static str;

    /// Returns `true` for providers that do not produce semantic embeddings.
    fn is_stub(&self) -> bool {
        false
    }
}
