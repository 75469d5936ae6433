//! Concrete agent implementations
//!
//! - ChatClientAgent (in `executor`): the chat-client run loop
//! - DelegatingAgent: routes conversations to named sub-agents

pub mod delegating;

pub use delegating::{DelegatingAgent, DelegatingAgentBuilder};
