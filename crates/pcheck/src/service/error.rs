use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::policy::PolicyError;

/// Failure classes reported at the service boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    EmbeddingFailure,
    Validation,
    DataIntegrity,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::EmbeddingFailure => "embedding_failure",
            ErrorKind::Validation => "validation_error",
            ErrorKind::DataIntegrity => "data_integrity_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by [`ComplianceService`](super::ComplianceService).
///
/// Messages name the policy and, where caller content is involved, only a truncated
/// excerpt of it.
#[derive(Debug, Error)]
pub enum ComplianceError {
    #[error("policy not found: {policy_id}")]
    NotFound { policy_id: String },

    #[error("failed to create embedding for policy '{policy_id}' (content: '{excerpt}'): {source}")]
    EmbeddingFailure {
        policy_id: String,
        excerpt: String,
        #[source]
        source: EmbeddingError,
    },

    #[error("invalid request for policy '{policy_id}': {reason}")]
    Validation { policy_id: String, reason: String },

    #[error("policy data integrity error: {reason}")]
    DataIntegrity {
        policy_id: Option<String>,
        reason: String,
    },
}

impl ComplianceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ComplianceError::NotFound { .. } => ErrorKind::NotFound,
            ComplianceError::EmbeddingFailure { .. } => ErrorKind::EmbeddingFailure,
            ComplianceError::Validation { .. } => ErrorKind::Validation,
            ComplianceError::DataIntegrity { .. } => ErrorKind::DataIntegrity,
        }
    }

    /// The policy the failure relates to, if known.
    pub fn policy_id(&self) -> Option<&str> {
        match self {
            ComplianceError::NotFound { policy_id }
            | ComplianceError::EmbeddingFailure { policy_id, .. }
            | ComplianceError::Validation { policy_id, .. } => Some(policy_id),
            ComplianceError::DataIntegrity { policy_id, .. } => policy_id.as_deref(),
        }
    }

    pub(crate) fn validation(policy_id: &str, reason: impl Into<String>) -> Self {
        ComplianceError::Validation {
            policy_id: policy_id.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<PolicyError> for ComplianceError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::Invalid { policy_id, reason } => {
                ComplianceError::Validation { policy_id, reason }
            }
            other => ComplianceError::DataIntegrity {
                policy_id: None,
                reason: other.to_string(),
            },
        }
    }
}
