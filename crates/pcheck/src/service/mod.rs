//! Compliance operations over a policy store and an embedding provider.
//!
//! [`ComplianceService`] is the only entry point callers (the HTTP gateway, tests) use:
//! registration derives and stores policies, checks embed caller content and score it
//! against a stored policy, and deletes remove policies by id.

mod error;
mod types;


use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::constants::content_excerpt;
use crate::embedding::{EmbeddingError, EmbeddingProvider};
use crate::policy::model::is_zero_vector;
use crate::policy::{Policy, PolicyStore, Repository};
use crate::registration::{RegistrationOptions, RegistrationRequest, derive_policy, embed_checked};
use crate::scoring::{CheckResult, ScoringError, score};

pub use error::{ComplianceError, ErrorKind};
pub use types::PolicyRef;

#[derive(Clone)]
/// Shared, cheaply cloneable compliance engine.
pub struct ComplianceService {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn Repository<String, Policy>>,
    options: RegistrationOptions,
}

impl std::fmt::Debug for ComplianceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplianceService")
            .field("embedder", &self.embedder.name())
            .field("policies", &self.store.len())
            .field("options", &self.options)
            .finish()
    }
}

impl ComplianceService {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn Repository<String, Policy>>,
        options: RegistrationOptions,
    ) -> Self {
        Self {
            embedder,
            store,
            options,
        }
    }

    /// Builds the service from `config`, preloading policies when a directory is set.
    ///
    /// Any unreadable or invalid preload file is a [`ComplianceError::DataIntegrity`].
    pub fn from_config(
        config: &Config,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self, ComplianceError> {
        let store = match &config.policy_dir {
            Some(dir) => PolicyStore::preload(dir, config.embedding_dim)?,
            None => {
                info!("No policy directory configured; starting with an empty store");
                PolicyStore::new()
            }
        };

        Ok(Self::new(
            embedder,
            Arc::new(store),
            RegistrationOptions::from_config(config),
        ))
    }

    pub fn options(&self) -> &RegistrationOptions {
        &self.options
    }

    pub fn embedder(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.embedder
    }

    /// Registers each request independently, in order.
    ///
    /// The returned vector has one entry per request; a failure never aborts the batch.
    #[instrument(skip(self, requests), fields(count = requests.len()))]
    pub async fn register_policies(
        &self,
        requests: &[RegistrationRequest],
    ) -> Vec<Result<PolicyRef, ComplianceError>> {
        let mut results = Vec::with_capacity(requests.len());
        for request in requests {
            let outcome = self.register_policy(request).await;
            if let Err(err) = &outcome {
                warn!(
                    policy_id = %request.policy_id,
                    kind = %err.kind(),
                    error = %err,
                    "Policy registration failed"
                );
            }
            results.push(outcome);
        }
        results
    }

    /// Derives and stores one policy, replacing any policy with the same id.
    pub async fn register_policy(
        &self,
        request: &RegistrationRequest,
    ) -> Result<PolicyRef, ComplianceError> {
        let policy = derive_policy(self.embedder.as_ref(), request, &self.options).await?;
        let stored = self.store.create(policy);

        info!(
            policy_id = stored.policy_id(),
            avg_optimal_distance = stored.avg_optimal_distance(),
            avg_off_topic_distance = stored.avg_off_topic_distance(),
            "Policy registered"
        );
        Ok(PolicyRef::new(stored.policy_id()))
    }

    /// Scores `content` against the stored policy `policy_id`.
    #[instrument(skip(self, content), fields(content_len = content.len()))]
    pub async fn check_content(
        &self,
        policy_id: &str,
        content: &str,
    ) -> Result<CheckResult, ComplianceError> {
        let policy = self
            .store
            .get_by_id(&policy_id.to_string())
            .ok_or_else(|| ComplianceError::NotFound {
                policy_id: policy_id.to_string(),
            })?;

        if content.trim().is_empty() {
            return Err(ComplianceError::validation(policy_id, "content is empty"));
        }

        let vector =
            embed_checked(self.embedder.as_ref(), policy_id, content, &self.options).await?;
        if vector.len() != policy.dimension() {
            return Err(ComplianceError::EmbeddingFailure {
                policy_id: policy_id.to_string(),
                excerpt: content_excerpt(content),
                source: EmbeddingError::DimensionMismatch {
                    expected: policy.dimension(),
                    actual: vector.len(),
                },
            });
        }

        let result = score(&vector, &policy).map_err(|err| scoring_error(&policy, err))?;
        debug!(
            policy_id,
            distance = result.calculated_distance,
            within_optimal = result.within_optimal(),
            "Content checked"
        );
        Ok(result)
    }

    /// Removes `policy_id`. Returns whether a policy was removed.
    pub fn delete_policy(&self, policy_id: &str) -> bool {
        let removed = self.store.delete(&policy_id.to_string());
        if removed {
            info!(policy_id, "Policy deleted");
        }
        removed
    }

    pub fn get_policy(&self, policy_id: &str) -> Option<Arc<Policy>> {
        self.store.get_by_id(&policy_id.to_string())
    }

    pub fn policy_count(&self) -> usize {
        self.store.len()
    }

    /// Stored policy ids, sorted.
    pub fn policy_ids(&self) -> Vec<String> {
        self.store.keys()
    }
}

fn scoring_error(policy: &Policy, err: ScoringError) -> ComplianceError {
    let stored_zero_centroid =
        matches!(err, ScoringError::ZeroMagnitude) && is_zero_vector(policy.content_vector());
    match err {
        ScoringError::InvalidReferenceDistance { .. } => ComplianceError::DataIntegrity {
            policy_id: Some(policy.policy_id().to_string()),
            reason: err.to_string(),
        },
        _ if stored_zero_centroid => ComplianceError::DataIntegrity {
            policy_id: Some(policy.policy_id().to_string()),
            reason: "stored content vector has zero magnitude".to_string(),
        },
        other => ComplianceError::validation(policy.policy_id(), other.to_string()),
    }
}
