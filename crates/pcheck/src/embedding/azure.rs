//! Azure OpenAI embeddings client.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::EmbeddingError;
use super::provider::EmbeddingProvider;
use crate::config::Config;

const API_KEY_HEADER: &str = "api-key";
const MAX_ERROR_BODY_CHARS: usize = 256;

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Embedding provider backed by an Azure OpenAI embeddings deployment.
///
/// Carries no timeout of its own; wrap it in
/// [`ResilientEmbedder`](super::ResilientEmbedder) for timeout and retry handling.
pub struct AzureOpenAiEmbedder {
    http: HttpClient,
    url: String,
    api_key: String,
}

impl std::fmt::Debug for AzureOpenAiEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureOpenAiEmbedder")
            .field("url", &self.url)
            .finish()
    }
}

impl AzureOpenAiEmbedder {
    /// Creates a client for `{endpoint}/openai/deployments/{deployment}/embeddings`.
    pub fn new(
        endpoint: &str,
        api_key: impl Into<String>,
        deployment: &str,
        api_version: &str,
    ) -> Result<Self, EmbeddingError> {
        let endpoint = endpoint.trim().trim_end_matches('/');
        if endpoint.is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "endpoint is empty".to_string(),
            });
        }
        if deployment.trim().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "deployment name is empty".to_string(),
            });
        }

        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "api key is empty".to_string(),
            });
        }

        let http = HttpClient::builder()
            .build()
            .map_err(|e| EmbeddingError::InvalidConfig {
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            url: embeddings_url(endpoint, deployment.trim(), api_version),
            api_key,
        })
    }

    /// Builds the client from [`Config`] (requires endpoint and API key).
    pub fn from_config(config: &Config) -> Result<Self, EmbeddingError> {
        let endpoint =
            config
                .embedding_endpoint
                .as_deref()
                .ok_or_else(|| EmbeddingError::InvalidConfig {
                    reason: "no embedding endpoint configured".to_string(),
                })?;
        let api_key = config.embedding_api_key.clone().unwrap_or_default();

        Self::new(
            endpoint,
            api_key,
            &config.embedding_deployment,
            &config.embedding_api_version,
        )
    }

    /// Returns the fully-qualified embeddings URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl EmbeddingProvider for AzureOpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        debug!(text_len = text.len(), "Requesting embedding");

        let response = self
            .http
            .post(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&EmbeddingsRequest { input: text })
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body);
            return Err(EmbeddingError::HttpStatus {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        parse_embeddings_response(&body)
    }

    fn name(&self) -> &'static str {
        "azure-openai"
    }
}

pub(crate) fn embeddings_url(endpoint: &str, deployment: &str, api_version: &str) -> String {
    format!(
        "{}/openai/deployments/{}/embeddings?api-version={}",
        endpoint, deployment, api_version
    )
}

/// Extracts `data[0].embedding` from an embeddings API response body.
pub(crate) fn parse_embeddings_response(body: &[u8]) -> Result<Vec<f32>, EmbeddingError> {
    let response: EmbeddingsResponse =
        serde_json::from_slice(body).map_err(|e| EmbeddingError::MalformedResponse {
            reason: e.to_string(),
        })?;

    let embedding = response
        .data
        .into_iter()
        .next()
        .map(|d| d.embedding)
        .ok_or_else(|| EmbeddingError::MalformedResponse {
            reason: "response contained no embeddings".to_string(),
        })?;

    if embedding.is_empty() {
        return Err(EmbeddingError::MalformedResponse {
            reason: "embedding vector is empty".to_string(),
        });
    }
    if embedding.iter().any(|v| !v.is_finite()) {
        return Err(EmbeddingError::MalformedResponse {
            reason: "embedding contains non-finite values".to_string(),
        });
    }

    Ok(embedding)
}
