//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `PCHECK_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_EMBED_CONCURRENCY, DEFAULT_EMBED_MAX_RETRIES, DEFAULT_EMBED_TIMEOUT_MS,
    DEFAULT_EMBEDDING_DIM,
};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `PCHECK_*` overrides on top of defaults.
#[derive(Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Directory of `*.json` policy records loaded at startup.
    pub policy_dir: Option<PathBuf>,

    /// Azure OpenAI resource endpoint. `None` runs the stub embedder.
    pub embedding_endpoint: Option<String>,

    /// API key for [`Config::embedding_endpoint`].
    pub embedding_api_key: Option<String>,

    /// Embedding model deployment name. Default: `text-embedding-ada-002`.
    pub embedding_deployment: String,

    /// Embeddings REST API version. Default: `2023-05-15`.
    pub embedding_api_version: String,

    /// Dimension every embedding and stored centroid must have. Default: `1536`.
    pub embedding_dim: usize,

    /// Timeout applied to each embedding attempt. Default: 10s.
    pub embed_timeout: Duration,

    /// Retries after a retryable embedding failure. Default: `2`.
    pub embed_max_retries: u32,

    /// Max in-flight embedding calls per policy registration. Default: `8`.
    pub embed_concurrency: usize,
}

/// Default embedding deployment used when `PCHECK_EMBEDDING_DEPLOYMENT` is not set.
pub const DEFAULT_EMBEDDING_DEPLOYMENT: &str = "text-embedding-ada-002";

/// Default embeddings API version used when `PCHECK_EMBEDDING_API_VERSION` is not set.
pub const DEFAULT_EMBEDDING_API_VERSION: &str = "2023-05-15";

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            policy_dir: None,
            embedding_endpoint: None,
            embedding_api_key: None,
            embedding_deployment: DEFAULT_EMBEDDING_DEPLOYMENT.to_string(),
            embedding_api_version: DEFAULT_EMBEDDING_API_VERSION.to_string(),
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            embed_timeout: Duration::from_millis(DEFAULT_EMBED_TIMEOUT_MS),
            embed_max_retries: DEFAULT_EMBED_MAX_RETRIES,
            embed_concurrency: DEFAULT_EMBED_CONCURRENCY,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("bind_addr", &self.bind_addr)
            .field("policy_dir", &self.policy_dir)
            .field("embedding_endpoint", &self.embedding_endpoint)
            .field(
                "embedding_api_key",
                &self.embedding_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("embedding_deployment", &self.embedding_deployment)
            .field("embedding_api_version", &self.embedding_api_version)
            .field("embedding_dim", &self.embedding_dim)
            .field("embed_timeout", &self.embed_timeout)
            .field("embed_max_retries", &self.embed_max_retries)
            .field("embed_concurrency", &self.embed_concurrency)
            .finish()
    }
}

impl Config {
    /// Env var holding the HTTP port.
    pub const ENV_PORT: &'static str = "PCHECK_PORT";
    const ENV_BIND_ADDR: &'static str = "PCHECK_BIND_ADDR";
    const ENV_POLICY_DIR: &'static str = "PCHECK_POLICY_DIR";
    const ENV_EMBEDDING_ENDPOINT: &'static str = "PCHECK_AOAI_ENDPOINT";
    const ENV_EMBEDDING_API_KEY: &'static str = "PCHECK_AOAI_APIKEY";
    const ENV_EMBEDDING_DEPLOYMENT: &'static str = "PCHECK_EMBEDDING_DEPLOYMENT";
    const ENV_EMBEDDING_API_VERSION: &'static str = "PCHECK_EMBEDDING_API_VERSION";
    const ENV_EMBEDDING_DIM: &'static str = "PCHECK_EMBEDDING_DIM";
    const ENV_EMBED_TIMEOUT_MS: &'static str = "PCHECK_EMBED_TIMEOUT_MS";
    const ENV_EMBED_MAX_RETRIES: &'static str = "PCHECK_EMBED_MAX_RETRIES";
    const ENV_EMBED_CONCURRENCY: &'static str = "PCHECK_EMBED_CONCURRENCY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let policy_dir = Self::parse_optional_path_from_env(Self::ENV_POLICY_DIR);
        let embedding_endpoint = Self::parse_optional_string_from_env(Self::ENV_EMBEDDING_ENDPOINT);
        let embedding_api_key = Self::parse_optional_string_from_env(Self::ENV_EMBEDDING_API_KEY);
        let embedding_deployment = Self::parse_string_from_env(
            Self::ENV_EMBEDDING_DEPLOYMENT,
            defaults.embedding_deployment,
        );
        let embedding_api_version = Self::parse_string_from_env(
            Self::ENV_EMBEDDING_API_VERSION,
            defaults.embedding_api_version,
        );
        let embedding_dim =
            Self::parse_number_from_env(Self::ENV_EMBEDDING_DIM, defaults.embedding_dim)?;
        let embed_timeout = Duration::from_millis(Self::parse_number_from_env(
            Self::ENV_EMBED_TIMEOUT_MS,
            defaults.embed_timeout.as_millis() as u64,
        )?);
        let embed_max_retries =
            Self::parse_number_from_env(Self::ENV_EMBED_MAX_RETRIES, defaults.embed_max_retries)?;
        let embed_concurrency =
            Self::parse_number_from_env(Self::ENV_EMBED_CONCURRENCY, defaults.embed_concurrency)?;

        Ok(Self {
            port,
            bind_addr,
            policy_dir,
            embedding_endpoint,
            embedding_api_key,
            embedding_deployment,
            embedding_api_version,
            embedding_dim,
            embed_timeout,
            embed_max_retries,
            embed_concurrency,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.policy_dir {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if self.embedding_dim == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_EMBEDDING_DIM,
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.embed_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_EMBED_CONCURRENCY,
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.embed_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_EMBED_TIMEOUT_MS,
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.embedding_endpoint.is_some() && self.embedding_api_key.is_none() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_EMBEDDING_API_KEY,
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Returns `true` if a real embedding endpoint is configured.
    pub fn has_embedding_endpoint(&self) -> bool {
        self.embedding_endpoint.is_some()
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        Self::parse_optional_string_from_env(var_name).map(PathBuf::from)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    /// Unset or blank falls back to `default`; anything else must parse as `T`.
    fn parse_number_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match Self::parse_optional_string_from_env(var_name) {
            Some(value) => value.parse().map_err(|e| ConfigError::InvalidValue {
                name: var_name,
                reason: format!("'{}' is not a valid number: {}", value, e),
            }),
            None => Ok(default),
        }
    }
}
