use tracing::debug;

use super::distance::cosine_distance;
use super::error::ScoringError;
use super::types::CheckResult;
use crate::policy::Policy;
use crate::policy::model::is_valid_reference_distance;

/// Scores `content_vector` against `policy`.
pub fn score(content_vector: &[f32], policy: &Policy) -> Result<CheckResult, ScoringError> {
    let distance = cosine_distance(content_vector, policy.content_vector())?;
    let result = score_distance(distance, policy)?;

    debug!(
        policy_id = policy.policy_id(),
        calculated_distance = result.calculated_distance,
        deviation_optimal = result.deviation_optimal_distance,
        deviation_off_topic = result.deviation_off_topic_distance,
        "Scored content"
    );

    Ok(result)
}

/// Turns an already computed cosine distance into deviation percentages.
///
/// Both deviations are divided by `avg_optimal_distance`. Each sign flips independently
/// when `distance` exceeds that deviation's own reference.
pub fn score_distance(distance: f32, policy: &Policy) -> Result<CheckResult, ScoringError> {
    let optimal = policy.avg_optimal_distance();
    let off_topic = policy.avg_off_topic_distance();

    if !is_valid_reference_distance(optimal) {
        return Err(ScoringError::InvalidReferenceDistance { value: optimal });
    }
    if !is_valid_reference_distance(off_topic) {
        return Err(ScoringError::InvalidReferenceDistance { value: off_topic });
    }

    let mut deviation_optimal = ((distance - optimal).abs() / optimal) * 100.0;
    if distance > optimal {
        deviation_optimal = -deviation_optimal;
    }

    let mut deviation_off_topic = ((distance - off_topic).abs() / optimal) * 100.0;
    if distance > off_topic {
        deviation_off_topic = -deviation_off_topic;
    }

    Ok(CheckResult {
        calculated_distance: distance,
        avg_optimal_distance: optimal,
        avg_off_topic_distance: off_topic,
        deviation_optimal_distance: deviation_optimal,
        deviation_off_topic_distance: deviation_off_topic,
    })
}
