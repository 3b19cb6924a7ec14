//! Policy derivation from example phrases.
//!
//! A registration embeds the content to look for (the centroid), then embeds every
//! on-topic and off-topic phrase and averages each set's cosine distance to the centroid.
//! Phrase embeddings run concurrently but results are consumed in input order, so the
//! sums (and therefore the stored distances) are deterministic.

mod types;

#[cfg(test)]
mod tests;

use futures_util::stream::{self, StreamExt, TryStreamExt};
use tracing::debug;

use crate::constants::{content_excerpt, validate_embedding_dim};
use crate::embedding::{EmbeddingError, EmbeddingProvider};
use crate::policy::Policy;
use crate::scoring::{ScoringError, cosine_distance};
use crate::service::ComplianceError;

pub use types::{RegistrationOptions, RegistrationRequest};

/// Derives a [`Policy`] from `request`. Does not store it.
pub async fn derive_policy(
    embedder: &dyn EmbeddingProvider,
    request: &RegistrationRequest,
    options: &RegistrationOptions,
) -> Result<Policy, ComplianceError> {
    let policy_id = request.policy_id.as_str();
    request
        .validate()
        .map_err(|reason| ComplianceError::validation(policy_id, reason))?;

    let centroid =
        embed_checked(embedder, policy_id, &request.content_to_look_for, options).await?;

    let avg_optimal_distance = mean_distance(
        embedder,
        policy_id,
        &centroid,
        &request.potential_phrases,
        options,
    )
    .await?;
    let avg_off_topic_distance = mean_distance(
        embedder,
        policy_id,
        &centroid,
        &request.off_topic_phrases,
        options,
    )
    .await?;

    debug!(
        policy_id,
        avg_optimal_distance,
        avg_off_topic_distance,
        potential = request.potential_phrases.len(),
        off_topic = request.off_topic_phrases.len(),
        "Derived policy"
    );

    Policy::new(
        policy_id,
        centroid,
        avg_optimal_distance,
        avg_off_topic_distance,
    )
    .map_err(ComplianceError::from)
}

/// Embeds `text` and asserts the configured dimension.
pub(crate) async fn embed_checked(
    embedder: &dyn EmbeddingProvider,
    policy_id: &str,
    text: &str,
    options: &RegistrationOptions,
) -> Result<Vec<f32>, ComplianceError> {
    let failure = |source: EmbeddingError| ComplianceError::EmbeddingFailure {
        policy_id: policy_id.to_string(),
        excerpt: content_excerpt(text),
        source,
    };

    let vector = embedder.embed(text).await.map_err(failure)?;
    validate_embedding_dim(vector.len(), options.embedding_dim).map_err(|_| {
        failure(EmbeddingError::DimensionMismatch {
            expected: options.embedding_dim,
            actual: vector.len(),
        })
    })?;
    Ok(vector)
}

async fn mean_distance(
    embedder: &dyn EmbeddingProvider,
    policy_id: &str,
    centroid: &[f32],
    phrases: &[String],
    options: &RegistrationOptions,
) -> Result<f32, ComplianceError> {
    let pending: Vec<_> = phrases
        .iter()
        .map(|phrase| async move {
            let vector = embed_checked(embedder, policy_id, phrase, options).await?;
            cosine_distance(centroid, &vector).map_err(|err| phrase_error(policy_id, phrase, err))
        })
        .collect();
    let distances: Vec<f32> = stream::iter(pending)
        .buffered(options.embed_concurrency.max(1))
        .try_collect()
        .await?;

    if distances.is_empty() {
        return Err(ComplianceError::validation(
            policy_id,
            "phrase set is empty",
        ));
    }

    let sum: f64 = distances.iter().map(|d| f64::from(*d)).sum();
    Ok((sum / distances.len() as f64) as f32)
}

fn phrase_error(policy_id: &str, phrase: &str, err: ScoringError) -> ComplianceError {
    ComplianceError::validation(
        policy_id,
        format!("cannot score phrase '{}': {}", content_excerpt(phrase), err),
    )
}
