use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("invalid policy '{policy_id}': {reason}")]
    Invalid { policy_id: String, reason: String },

    #[error("failed to read policy data at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed policy file {path}: {source}")]
    MalformedFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("policy file {path} failed integrity check: {reason}")]
    DataIntegrity { path: PathBuf, reason: String },
}

pub type PolicyResult<T> = Result<T, PolicyError>;
