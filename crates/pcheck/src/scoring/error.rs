use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("vector length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("cannot compare empty vectors")]
    EmptyVector,

    #[error("cosine distance is undefined for a zero-magnitude vector")]
    ZeroMagnitude,

    #[error("vector contains non-finite values")]
    NonFiniteValue,

    #[error("reference distance must be positive and finite, got {value}")]
    InvalidReferenceDistance { value: f32 },
}
