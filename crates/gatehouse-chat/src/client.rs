//! Chat client trait definition

use crate::{ChatRequest, ChatResponse, Result};
use async_trait::async_trait;

/// Trait for chat completion clients
///
/// Implementations of this trait provide access to different chat completion
/// services (e.g., OpenAI-compatible endpoints, local deployments).
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Generate a completion for the given request
    ///
    /// # Arguments
    ///
    /// * `request` - The chat request with messages, tools, and parameters
    ///
    /// # Returns
    ///
    /// The completion response with the assistant's message and metadata
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse>;

    /// Get the client name (e.g., "openai")
    fn name(&self) -> &str;
}
