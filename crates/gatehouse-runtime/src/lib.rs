//! Agent runtime for gatehouse
//!
//! This crate provides the run-loop infrastructure for executing agents
//! against a chat client: the `ChatClientAgent` loop with tool execution and
//! human-approval gating, a `DelegatingAgent` for routing between
//! specialists, and the `Runtime` container for shared dependencies.

pub mod agents;
pub mod executor;
pub mod runtime;

// Re-export key types
pub use agents::DelegatingAgent;
pub use executor::{AgentConfig, ChatClientAgent, ChatClientAgentBuilder};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
