//! Core ChatAgent trait definition

use crate::message::ChatMessage;
use crate::run::{AgentRunResponse, AgentRunUpdate};
use crate::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;

/// The update stream produced by one agent run
///
/// Fragments arrive in order and are not replayable. Dropping the stream
/// cancels the run; agents hold no resources that outlive it.
pub type AgentRunStream = BoxStream<'static, Result<AgentRunUpdate>>;

/// Core trait that all agents implement
///
/// Streaming is the primitive: `run_stream` yields fragments as the agent
/// produces them. The non-streaming `run` drains the same stream and
/// accumulates the fragments in order, so both paths always return
/// identical content.
#[async_trait]
pub trait ChatAgent: Send + Sync {
    /// Get the agent's name
    fn name(&self) -> &str;

    /// Run the agent over the given conversation, streaming updates
    async fn run_stream(&self, messages: Vec<ChatMessage>) -> Result<AgentRunStream>;

    /// Run the agent to completion over the given conversation
    async fn run(&self, messages: Vec<ChatMessage>) -> Result<AgentRunResponse> {
        let mut stream = self.run_stream(messages).await?;
        let mut updates = Vec::new();
        while let Some(update) = stream.next().await {
            updates.push(update?);
        }
        Ok(AgentRunResponse::from_updates(updates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Content, Role};
    use futures::stream;

    struct EchoAgent;

    #[async_trait]
    impl ChatAgent for EchoAgent {
        fn name(&self) -> &str {
            "echo"
        }

        async fn run_stream(&self, messages: Vec<ChatMessage>) -> Result<AgentRunStream> {
            let text = messages
                .last()
                .and_then(|m| m.text().map(str::to_owned))
                .unwrap_or_default();
            let first = AgentRunUpdate::new(Role::Assistant, vec![Content::text("echo: ")]);
            let second = AgentRunUpdate::new(Role::Assistant, vec![Content::text(text)])
                .with_response_id(first.response_id.clone())
                .with_message_id(first.message_id.clone());
            Ok(stream::iter(vec![Ok(first), Ok(second)]).boxed())
        }
    }

    #[tokio::test]
    async fn test_run_accumulates_stream() {
        let agent = EchoAgent;
        let response = agent
            .run(vec![ChatMessage::user("hi")])
            .await
            .expect("run");
        assert_eq!(response.messages.len(), 1);
        assert_eq!(response.messages[0].contents.len(), 2);
    }

    #[tokio::test]
    async fn test_run_matches_stream_order() {
        let agent = EchoAgent;
        let mut stream = agent
            .run_stream(vec![ChatMessage::user("hi")])
            .await
            .expect("stream");

        let mut updates = Vec::new();
        while let Some(update) = stream.next().await {
            updates.push(update.expect("update"));
        }
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].text(), Some("echo: "));
        assert_eq!(updates[1].text(), Some("hi"));
    }
}
