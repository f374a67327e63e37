//! Client configuration module
//!
//! Provides the endpoints a client needs to talk to an Eventure server: the
//! GraphQL endpoint and the realtime socket.

use thiserror::Error;

/// Default GraphQL endpoint of a local development server
pub const DEFAULT_API_URL: &str = "http://localhost:4000/graphql";

/// Default realtime socket of a local development server
pub const DEFAULT_REALTIME_URL: &str = "ws://localhost:4000/ws";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// GraphQL endpoint (http or https)
    pub api_url: String,
    /// Realtime socket endpoint (ws or wss)
    pub realtime_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            realtime_url: DEFAULT_REALTIME_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfigBuilder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Derive both endpoints from a server base URL such as `http://host:4000`
    pub fn for_server(base_url: &str) -> Result<Self, ConfigError> {
        let base = base_url.trim_end_matches('/');
        let realtime_base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            return Err(ConfigError::InvalidUrl(base_url.to_string()));
        };

        Self::builder()
            .api_url(format!("{}/graphql", base))
            .realtime_url(format!("{}/ws", realtime_base))
            .build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(self.api_url.clone()));
        }
        if !(self.realtime_url.starts_with("ws://") || self.realtime_url.starts_with("wss://")) {
            return Err(ConfigError::InvalidUrl(self.realtime_url.clone()));
        }
        Ok(())
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    api_url: Option<String>,
    realtime_url: Option<String>,
}

impl ClientConfigBuilder {
    /// Set the GraphQL endpoint
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set the realtime socket endpoint
    pub fn realtime_url(mut self, url: impl Into<String>) -> Self {
        self.realtime_url = Some(url.into());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let config = ClientConfig {
            api_url: self.api_url.ok_or(ConfigError::MissingValue("api_url"))?,
            realtime_url: self
                .realtime_url
                .ok_or(ConfigError::MissingValue("realtime_url"))?,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
