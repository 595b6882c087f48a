//! Main client for the Orbital SDK.

use crate::api::*;
use crate::config::{ClientConfig, RetryConfig};
use crate::error::OrbitalResult;
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Default base URL of the hosted Orbital agents API.
pub const DEFAULT_BASE_URL: &str = "https://agents.orbital.dev";

/// Main client for interacting with the Orbital agents API.
///
/// Configuration is fixed at construction; the client is cheap to clone and
/// safe to share across tasks.
#[derive(Clone)]
pub struct OrbitalClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl OrbitalClient {
    /// Create a new client builder.
    pub fn builder() -> OrbitalClientBuilder {
        OrbitalClientBuilder::new()
    }

    /// Create a client from configuration.
    fn from_config(config: ClientConfig) -> OrbitalResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the health API.
    pub fn health(&self) -> HealthApi<'_> {
        HealthApi::new(self)
    }

    /// Get the agents API.
    pub fn agents(&self) -> AgentsApi<'_> {
        AgentsApi::new(self)
    }

    /// Get the executions API.
    pub fn executions(&self) -> ExecutionsApi<'_> {
        ExecutionsApi::new(self)
    }

    /// Get the profiles API.
    pub fn profiles(&self) -> ProfilesApi<'_> {
        ProfilesApi::new(self)
    }

    /// Get the credentials API.
    pub fn credentials(&self) -> CredentialsApi<'_> {
        CredentialsApi::new(self)
    }

    /// Get the files API.
    pub fn files(&self) -> FilesApi<'_> {
        FilesApi::new(self)
    }
}

/// Builder for creating an OrbitalClient.
pub struct OrbitalClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
    retry_config: RetryConfig,
}

impl OrbitalClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: Duration::from_secs(30),
            retry_config: RetryConfig::default(),
        }
    }

    /// Set the base URL. Defaults to [`DEFAULT_BASE_URL`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry configuration.
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Build the client.
    pub fn build(self) -> OrbitalResult<OrbitalClient> {
        let base_url_str = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(base_url_str)?;

        let config = ClientConfig {
            base_url,
            api_key: self.api_key,
            timeout: self.timeout,
            retry_config: self.retry_config,
        };

        OrbitalClient::from_config(config)
    }
}

impl Default for OrbitalClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
