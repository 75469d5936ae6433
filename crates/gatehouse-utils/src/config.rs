//! Configuration for gatehouse programs

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required setting is missing
    #[error("Missing configuration: {0}")]
    Missing(String),

    /// A setting carries an unusable value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for gatehouse scenario programs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatehouseConfig {
    /// Model identifier passed to the chat client
    pub model: String,

    /// API key for the chat endpoint
    pub api_key: Option<String>,

    /// Base URL of the chat endpoint (None uses the provider default)
    pub api_base: Option<String>,

    /// Request timeout
    pub request_timeout: Duration,
}

impl Default for GatehouseConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            api_key: None,
            api_base: None,
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl GatehouseConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `GATEHOUSE_MODEL`, `OPENAI_API_KEY`, and `OPENAI_API_BASE`;
    /// anything unset keeps its default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(model) = std::env::var("GATEHOUSE_MODEL") {
            config.model = model;
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.api_key = Some(key);
        }
        if let Ok(base) = std::env::var("OPENAI_API_BASE") {
            config.api_base = Some(base);
        }
        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model must not be empty".to_string()));
        }

        if self.api_key.is_none() && self.api_base.is_none() {
            return Err(ConfigError::Missing(
                "either OPENAI_API_KEY or OPENAI_API_BASE must be set".to_string(),
            ));
        }

        Ok(())
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }
}
