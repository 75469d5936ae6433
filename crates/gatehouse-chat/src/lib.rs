//! Chat client abstraction layer for gatehouse
//!
//! This crate provides provider-agnostic abstractions for talking to chat
//! completion services:
//!
//! - Completion request/response types over the gatehouse message model
//! - The `ChatClient` trait implemented by providers
//! - A reqwest-based OpenAI-compatible provider (behind the `openai` feature)

pub mod client;
pub mod completion;
pub mod error;

// Re-export main types
pub use client::ChatClient;
pub use completion::{ChatRequest, ChatRequestBuilder, ChatResponse, StopReason, TokenUsage};
pub use error::{ChatError, Result};

// Provider implementations (feature-gated)
#[cfg(feature = "openai")]
pub mod providers;
