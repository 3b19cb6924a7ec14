use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmbeddingError {
    #[error("embedding request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("embedding provider returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("embedding request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("malformed embedding response: {reason}")]
    MalformedResponse { reason: String },

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid embedding provider configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl EmbeddingError {
    /// Returns `true` for failures worth another attempt (transport errors, timeouts,
    /// HTTP 429 and 5xx).
    pub fn is_retryable(&self) -> bool {
        match self {
            EmbeddingError::RequestFailed { .. } | EmbeddingError::Timeout { .. } => true,
            EmbeddingError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            EmbeddingError::MalformedResponse { .. }
            | EmbeddingError::DimensionMismatch { .. }
            | EmbeddingError::InvalidConfig { .. } => false,
        }
    }
}

impl From<reqwest::Error> for EmbeddingError {
    fn from(err: reqwest::Error) -> Self {
        EmbeddingError::RequestFailed {
            reason: err.to_string(),
        }
    }
}
