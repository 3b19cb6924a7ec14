//! Cosine distance and policy deviation scoring.
//!
//! A content embedding is compared to a policy centroid; the resulting distance is
//! expressed as signed percentages relative to the policy's on-topic reference distance.
//!
//! # Off-topic normalization
//!
//! Both deviations are divided by `avg_optimal_distance`, the off-topic one included.
//! Do not switch it to `avg_off_topic_distance` without re-calibrating every consumer
//! of the off-topic figure.

pub mod distance;
pub mod error;
pub mod scorer;
pub mod types;

#[cfg(test)]
mod tests;

pub use distance::{cosine_distance, cosine_similarity};
pub use error::ScoringError;
pub use scorer::{score, score_distance};
pub use types::CheckResult;
