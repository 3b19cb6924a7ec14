//! Policy compliance scoring library (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Service configuration
//! - [`ComplianceService`], [`ComplianceError`] - Register, check and delete policies
//! - [`Policy`], [`PolicyStore`] - Stored policy records and their in-memory store
//!
//! ## Embedding & Scoring
//! - [`EmbeddingProvider`] - Async embedding seam ([`AzureOpenAiEmbedder`], [`StubEmbedder`])
//! - [`ResilientEmbedder`] - Timeout and retry wrapper
//! - [`cosine_distance`], [`score`], [`CheckResult`] - Distance math and deviations
//!
//! ## Test/Mock Support
//! [`MockEmbedder`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod policy;
pub mod registration;
pub mod scoring;
pub mod service;

pub use config::{Config, ConfigError};
pub use constants::{
    CONTENT_EXCERPT_CHARS, DEFAULT_EMBEDDING_DIM, DimValidationError, POLICY_CHECK_ROUTE,
    content_excerpt, validate_embedding_dim,
};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
pub use embedding::{
    AzureOpenAiEmbedder, EmbeddingError, EmbeddingProvider, ResilientEmbedder, RetryPolicy,
    StubEmbedder, build_embedder,
};
pub use policy::{
    MemoryRepository, Policy, PolicyError, PolicyRecord, PolicyStore, Repository, StoredRecord,
};
pub use registration::{RegistrationOptions, RegistrationRequest, derive_policy};
pub use scoring::{CheckResult, ScoringError, cosine_distance, cosine_similarity, score};
pub use service::{ComplianceError, ComplianceService, ErrorKind, PolicyRef};
