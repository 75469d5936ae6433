//! Approval gate wrapper agent

use crate::inbound::translate_inbound;
use crate::outbound::translate_update;
use async_trait::async_trait;
use futures::StreamExt;
use gatehouse_core::{AgentRunStream, ChatAgent, ChatMessage, Result};
use std::sync::Arc;

/// An agent that speaks the approval protocol on behalf of an inner agent
///
/// The inbound pass runs once, eagerly, over the full incoming conversation
/// before the inner agent is invoked; the outbound pass is applied lazily to
/// each fragment as the inner agent streams it, with no buffering or
/// reordering. Cancellation is pass-through: dropping the stream stops both
/// the inner run and the translation, and the gate holds no resources of its
/// own.
pub struct ApprovalGateAgent {
    inner: Arc<dyn ChatAgent>,
    name: String,
}

impl ApprovalGateAgent {
    /// Wrap an inner agent behind the approval protocol
    pub fn new(inner: Arc<dyn ChatAgent>) -> Self {
        let name = format!("{}-approval-gate", inner.name());
        Self { inner, name }
    }

    /// Get the wrapped agent
    pub fn inner(&self) -> &Arc<dyn ChatAgent> {
        &self.inner
    }
}

#[async_trait]
impl ChatAgent for ApprovalGateAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run_stream(&self, messages: Vec<ChatMessage>) -> Result<AgentRunStream> {
        let translated = translate_inbound(messages)?;
        let stream = self.inner.run_stream(translated).await?;
        Ok(stream.map(|update| update.map(translate_update)).boxed())
    }
}
