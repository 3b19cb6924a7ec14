use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
/// Deviation of a piece of content from a policy's reference distances.
///
/// Carries no verdict; thresholds belong to the caller.
pub struct CheckResult {
    /// Cosine distance between the content and the policy centroid.
    pub calculated_distance: f32,
    /// Copied from the policy.
    pub avg_optimal_distance: f32,
    /// Copied from the policy.
    pub avg_off_topic_distance: f32,
    /// Signed percentage; negative when the content is farther out than the on-topic
    /// reference.
    pub deviation_optimal_distance: f32,
    /// Signed percentage, normalized by the optimal (not off-topic) reference; negative
    /// when the content is farther out than the off-topic reference.
    pub deviation_off_topic_distance: f32,
}

impl CheckResult {
    /// `true` when the content sits at or inside the on-topic reference distance.
    pub fn within_optimal(&self) -> bool {
        self.calculated_distance <= self.avg_optimal_distance
    }

    /// `true` when the content sits beyond the off-topic reference distance.
    pub fn beyond_off_topic(&self) -> bool {
        self.calculated_distance > self.avg_off_topic_distance
    }
}

impl std::fmt::Display for CheckResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "distance {:.4} (optimal {:.4}, {:+.1}%; off-topic {:.4}, {:+.1}%)",
            self.calculated_distance,
            self.avg_optimal_distance,
            self.deviation_optimal_distance,
            self.avg_off_topic_distance,
            self.deviation_off_topic_distance
        )
    }
}
