use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::constants::{DEFAULT_EMBED_CONCURRENCY, DEFAULT_EMBEDDING_DIM};

/// One policy definition submitted for registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegistrationRequest {
    pub policy_id: String,
    /// Text describing the content the policy looks for; becomes the centroid.
    pub content_to_look_for: String,
    /// Phrases considered on-topic.
    #[serde(default)]
    pub potential_phrases: Vec<String>,
    /// Phrases considered off-topic.
    #[serde(default)]
    pub off_topic_phrases: Vec<String>,
}

impl RegistrationRequest {
    pub fn new(policy_id: impl Into<String>, content_to_look_for: impl Into<String>) -> Self {
        Self {
            policy_id: policy_id.into(),
            content_to_look_for: content_to_look_for.into(),
            ..Default::default()
        }
    }

    pub fn with_potential_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.potential_phrases = phrases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_off_topic_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.off_topic_phrases = phrases.into_iter().map(Into::into).collect();
        self
    }

    /// Checks the request shape before any embedding call is made.
    pub fn validate(&self) -> Result<(), String> {
        if self.policy_id.trim().is_empty() {
            return Err("policy id is empty".to_string());
        }
        if self.content_to_look_for.trim().is_empty() {
            return Err("content to look for is empty".to_string());
        }
        if self.potential_phrases.is_empty() {
            return Err("potential phrases must not be empty".to_string());
        }
        if self.off_topic_phrases.is_empty() {
            return Err("off-topic phrases must not be empty".to_string());
        }
        Ok(())
    }
}

/// Tunables for deriving a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationOptions {
    /// Expected length of every embedding.
    pub embedding_dim: usize,
    /// Max in-flight embedding calls per phrase set.
    pub embed_concurrency: usize,
}

impl Default for RegistrationOptions {
    fn default() -> Self {
        Self {
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            embed_concurrency: DEFAULT_EMBED_CONCURRENCY,
        }
    }
}

impl RegistrationOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            embedding_dim: config.embedding_dim,
            embed_concurrency: config.embed_concurrency,
        }
    }

    pub fn with_embedding_dim(mut self, embedding_dim: usize) -> Self {
        self.embedding_dim = embedding_dim;
        self
    }

    pub fn with_concurrency(mut self, embed_concurrency: usize) -> Self {
        self.embed_concurrency = embed_concurrency;
        self
    }
}
