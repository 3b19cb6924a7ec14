//! Cross-cutting, shared constants.
//!
//! # Dimension Invariants
//!
//! Every policy centroid and every content embedding scored against it must have the
//! same length. The deployment's dimension is fixed at startup (see
//! [`crate::config::Config::embedding_dim`]); use [`validate_embedding_dim`] at module
//! boundaries so a provider that changes its output size is caught instead of producing
//! meaningless distances.

use thiserror::Error;

/// Output dimension of `text-embedding-ada-002`.
pub const DEFAULT_EMBEDDING_DIM: usize = 1536;

/// Max characters of caller content echoed back in error messages.
pub const CONTENT_EXCERPT_CHARS: usize = 32;

/// Default number of concurrent embedding calls per registration.
pub const DEFAULT_EMBED_CONCURRENCY: usize = 8;

/// Default per-attempt embedding timeout.
pub const DEFAULT_EMBED_TIMEOUT_MS: u64 = 10_000;

/// Default number of retries after a failed embedding attempt.
pub const DEFAULT_EMBED_MAX_RETRIES: u32 = 2;

/// URI prefix under which registered policies can be checked.
pub const POLICY_CHECK_ROUTE: &str = "/policycheck";

/// Error returned when dimension validation fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    #[error("embedding dimension cannot be zero")]
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Validates that a runtime embedding dimension matches the expected dimension.
///
/// # Example
///
/// ```
/// use pcheck::constants::{validate_embedding_dim, DEFAULT_EMBEDDING_DIM};
///
/// let provider_dim = 1536;
/// validate_embedding_dim(provider_dim, DEFAULT_EMBEDDING_DIM).unwrap();
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if expected == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

/// Returns at most [`CONTENT_EXCERPT_CHARS`] characters of `content`, suffixed with `...`
/// when truncated. Splits on char boundaries.
pub fn content_excerpt(content: &str) -> String {
    match content.char_indices().nth(CONTENT_EXCERPT_CHARS) {
        Some((idx, _)) => format!("{}...", &content[..idx]),
        None => content.to_string(),
    }
}
