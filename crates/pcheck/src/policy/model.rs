use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{PolicyError, PolicyResult};
use super::store::StoredRecord;

/// Stored compliance reference: a centroid embedding plus two reference distances.
///
/// Only constructed by registration and preload, both of which go through
/// [`Policy::new`]'s validation. Never mutated in place; replaced wholesale in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    id: Uuid,
    policy_id: String,
    content_vector: Vec<f32>,
    avg_optimal_distance: f32,
    avg_off_topic_distance: f32,
}

impl Policy {
    pub(crate) fn new(
        policy_id: impl Into<String>,
        content_vector: Vec<f32>,
        avg_optimal_distance: f32,
        avg_off_topic_distance: f32,
    ) -> PolicyResult<Self> {
        let policy_id = policy_id.into();
        let invalid = |reason: String| PolicyError::Invalid {
            policy_id: policy_id.clone(),
            reason,
        };

        if policy_id.trim().is_empty() {
            return Err(invalid("policy id is empty".to_string()));
        }
        if content_vector.is_empty() {
            return Err(invalid("content vector is empty".to_string()));
        }
        if content_vector.iter().any(|v| !v.is_finite()) {
            return Err(invalid(
                "content vector contains non-finite values".to_string(),
            ));
        }
        if is_zero_vector(&content_vector) {
            return Err(invalid("content vector has zero magnitude".to_string()));
        }
        if !is_valid_reference_distance(avg_optimal_distance) {
            return Err(invalid(format!(
                "avg optimal distance must be positive and finite, got {}",
                avg_optimal_distance
            )));
        }
        if !is_valid_reference_distance(avg_off_topic_distance) {
            return Err(invalid(format!(
                "avg off-topic distance must be positive and finite, got {}",
                avg_off_topic_distance
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            policy_id,
            content_vector,
            avg_optimal_distance,
            avg_off_topic_distance,
        })
    }

    /// Process-unique id, renewed each time the record is stored.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Caller-supplied logical key.
    pub fn policy_id(&self) -> &str {
        &self.policy_id
    }

    /// Centroid embedding of the content to look for.
    pub fn content_vector(&self) -> &[f32] {
        &self.content_vector
    }

    /// Mean cosine distance between the centroid and the on-topic phrases.
    pub fn avg_optimal_distance(&self) -> f32 {
        self.avg_optimal_distance
    }

    /// Mean cosine distance between the centroid and the off-topic phrases.
    pub fn avg_off_topic_distance(&self) -> f32 {
        self.avg_off_topic_distance
    }

    /// Embedding dimension of the centroid.
    pub fn dimension(&self) -> usize {
        self.content_vector.len()
    }
}

impl StoredRecord for Policy {
    type Key = String;

    fn key(&self) -> &String {
        &self.policy_id
    }

    fn renew_id(&mut self) {
        self.id = Uuid::new_v4();
    }
}

pub(crate) fn is_zero_vector(vector: &[f32]) -> bool {
    vector.iter().all(|v| *v == 0.0)
}

pub(crate) fn is_valid_reference_distance(distance: f32) -> bool {
    distance.is_finite() && distance > 0.0
}

/// On-disk policy format used by the preload directory (one JSON object per file).
///
/// The policy key is not part of the record; it is the file's base name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRecord {
    pub vector_content_to_look_for: Vec<f32>,
    pub avg_optimal_distance: f32,
    pub avg_off_topic_distance: f32,
}

impl From<&Policy> for PolicyRecord {
    fn from(policy: &Policy) -> Self {
        Self {
            vector_content_to_look_for: policy.content_vector.clone(),
            avg_optimal_distance: policy.avg_optimal_distance,
            avg_off_topic_distance: policy.avg_off_topic_distance,
        }
    }
}

impl PolicyRecord {
    pub(crate) fn into_policy(self, policy_id: &str) -> PolicyResult<Policy> {
        Policy::new(
            policy_id,
            self.vector_content_to_look_for,
            self.avg_optimal_distance,
            self.avg_off_topic_distance,
        )
    }
}
