//! Core abstractions for gatehouse
//!
//! This crate defines the conversation model and the fundamental traits used
//! throughout the gatehouse workspace: typed message content (including the
//! native approval request/response records), streaming run updates, and the
//! `ChatAgent` trait every agent implements.

pub mod agent;
pub mod error;
pub mod message;
pub mod run;

pub use agent::{AgentRunStream, ChatAgent};
pub use error::{Error, Result};
pub use message::{ChatMessage, Content, FunctionApprovalRequest, FunctionApprovalResponse, Role};
pub use run::{AgentRunResponse, AgentRunUpdate};
