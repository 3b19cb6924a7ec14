//! Embedding providers.
//!
//! - [`EmbeddingProvider`] is the async seam every provider implements.
//! - [`AzureOpenAiEmbedder`] calls an Azure OpenAI embeddings deployment.
//! - [`StubEmbedder`] produces deterministic vectors without network access.
//! - [`ResilientEmbedder`] applies a uniform timeout + retry policy to any provider.

/// Azure OpenAI REST client.
pub mod azure;
mod error;
/// Provider selection from [`crate::config::Config`].
pub mod factory;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod provider;
/// Timeout/retry wrapper.
pub mod resilient;
/// Deterministic stub provider.
pub mod stub;


pub use azure::AzureOpenAiEmbedder;
pub use error::EmbeddingError;
pub use factory::build_embedder;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;
pub use provider::EmbeddingProvider;
pub use resilient::{DEFAULT_RETRY_BACKOFF, ResilientEmbedder, RetryPolicy};
pub use stub::StubEmbedder;
