//! Fan-out/fan-in composition

use futures::future::try_join_all;
use gatehouse_core::{AgentRunResponse, ChatAgent, ChatMessage, Error, Result};
use std::sync::Arc;
use tracing::debug;

/// Fan-out/fan-in over a set of labeled agents
///
/// Every agent receives the same input conversation; the replies are
/// gathered in declaration order once all agents finish. Failure of any
/// branch fails the whole fan-out.
pub struct Concurrent {
    agents: Vec<(String, Arc<dyn ChatAgent>)>,
}

impl Concurrent {
    /// Create a new builder
    pub fn builder() -> ConcurrentBuilder {
        ConcurrentBuilder::new()
    }

    /// Dispatch the conversation to all agents and gather their responses
    ///
    /// # Returns
    ///
    /// One `(label, response)` pair per agent, in declaration order.
    pub async fn execute(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<Vec<(String, AgentRunResponse)>> {
        debug!(branches = self.agents.len(), "fanning out conversation");

        let branches = self.agents.iter().map(|(label, agent)| {
            let input = messages.clone();
            let label = label.clone();
            let agent = agent.clone();
            async move {
                let response = agent.run(input).await?;
                Ok::<_, Error>((label, response))
            }
        });

        try_join_all(branches).await
    }

    /// Number of branches
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Check whether there are no branches
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// Builder for Concurrent
pub struct ConcurrentBuilder {
    agents: Vec<(String, Arc<dyn ChatAgent>)>,
}

impl ConcurrentBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self { agents: Vec::new() }
    }

    /// Add a labeled branch
    pub fn add_agent(mut self, label: impl Into<String>, agent: Arc<dyn ChatAgent>) -> Self {
        self.agents.push((label.into(), agent));
        self
    }

    /// Build the fan-out
    ///
    /// # Errors
    ///
    /// Returns an error if no branches were added.
    pub fn build(self) -> Result<Concurrent> {
        if self.agents.is_empty() {
            return Err(Error::InitializationFailed(
                "No agents added to fan-out".to_string(),
            ));
        }
        Ok(Concurrent {
            agents: self.agents,
        })
    }
}

impl Default for ConcurrentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::{stream, StreamExt};
    use gatehouse_core::{AgentRunStream, AgentRunUpdate, Content, Role};

    struct NamedAgent(&'static str);

    #[async_trait]
    impl ChatAgent for NamedAgent {
        fn name(&self) -> &str {
            self.0
        }

        async fn run_stream(&self, _messages: Vec<ChatMessage>) -> Result<AgentRunStream> {
            let update = AgentRunUpdate::new(Role::Assistant, vec![Content::text(self.0)]);
            Ok(stream::iter(vec![Ok(update)]).boxed())
        }
    }

    struct FailingAgent;

    #[async_trait]
    impl ChatAgent for FailingAgent {
        fn name(&self) -> &str {
            "failing"
        }

        async fn run_stream(&self, _messages: Vec<ChatMessage>) -> Result<AgentRunStream> {
            Err(Error::RunFailed("boom".to_string()))
        }
    }

    #[tokio::test]
    async fn test_fan_out_preserves_declaration_order() {
        let fan = Concurrent::builder()
            .add_agent("damage", Arc::new(NamedAgent("damage-report")))
            .add_agent("coverage", Arc::new(NamedAgent("coverage-report")))
            .add_agent("fraud", Arc::new(NamedAgent("fraud-report")))
            .build()
            .expect("build");

        let results = fan
            .execute(vec![ChatMessage::user("claim #42")])
            .await
            .expect("execute");

        let labels: Vec<&str> = results.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["damage", "coverage", "fraud"]);
        assert_eq!(results[2].1.text(), "fraud-report");
    }

    #[tokio::test]
    async fn test_failing_branch_fails_fan_out() {
        let fan = Concurrent::builder()
            .add_agent("ok", Arc::new(NamedAgent("ok")))
            .add_agent("bad", Arc::new(FailingAgent))
            .build()
            .expect("build");

        assert!(fan.execute(vec![ChatMessage::user("go")]).await.is_err());
    }

    #[test]
    fn test_builder_requires_agents() {
        assert!(Concurrent::builder().build().is_err());
    }
}
