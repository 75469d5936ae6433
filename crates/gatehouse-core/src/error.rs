//! Error types for gatehouse-core

use thiserror::Error;

/// Result type alias for gatehouse-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for agent operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Agent initialization failed
    #[error("Agent initialization failed: {0}")]
    InitializationFailed(String),

    /// Agent run failed
    #[error("Agent run failed: {0}")]
    RunFailed(String),

    /// A message or update violated a translation protocol
    #[error("Protocol violation: {0}")]
    Protocol(String),
}
