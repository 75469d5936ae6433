//! Error types for the scenario programs

use thiserror::Error;

/// Scenario-specific errors
#[derive(Debug, Error)]
pub enum DemoError {
    /// An agent run failed
    #[error("Agent error: {0}")]
    Agent(#[from] gatehouse_core::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] gatehouse_utils::ConfigError),

    /// Prompt template rendering failed
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A scenario step produced no usable output
    #[error("Scenario error: {0}")]
    Scenario(String),
}

/// Result type alias for scenario operations
pub type Result<T> = std::result::Result<T, DemoError>;
