//! Delegating agent implementation (routes to sub-agents)

use async_trait::async_trait;
use gatehouse_core::{AgentRunStream, ChatAgent, ChatMessage, Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// An agent that delegates to sub-agents based on routing logic
///
/// DelegatingAgent provides a hierarchical agent structure where a routing
/// function inspects the conversation and selects a specialist by key. This
/// is useful for:
/// - Manager-worker patterns
/// - Specialized task routing
/// - Dynamic agent selection
pub struct DelegatingAgent {
    sub_agents: HashMap<String, Arc<dyn ChatAgent>>,
    router: Box<dyn Fn(&[ChatMessage]) -> String + Send + Sync>,
    name: String,
}

impl DelegatingAgent {
    /// Create a new builder for a delegating agent
    pub fn builder(name: impl Into<String>) -> DelegatingAgentBuilder {
        DelegatingAgentBuilder::new(name)
    }

    /// Get the number of sub-agents
    pub fn agent_count(&self) -> usize {
        self.sub_agents.len()
    }

    /// Get the list of available agent names
    pub fn agent_names(&self) -> Vec<&str> {
        self.sub_agents.keys().map(|s| s.as_str()).collect()
    }
}

#[async_trait]
impl ChatAgent for DelegatingAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run_stream(&self, messages: Vec<ChatMessage>) -> Result<AgentRunStream> {
        let key = (self.router)(&messages);
        debug!(agent = %self.name, routed_to = %key, "delegating conversation");

        let agent = self.sub_agents.get(&key).ok_or_else(|| {
            Error::RunFailed(format!(
                "Agent '{}' not found. Available agents: {:?}",
                key,
                self.agent_names()
            ))
        })?;

        agent.run_stream(messages).await
    }
}

/// Builder for DelegatingAgent
pub struct DelegatingAgentBuilder {
    sub_agents: HashMap<String, Arc<dyn ChatAgent>>,
    router: Option<Box<dyn Fn(&[ChatMessage]) -> String + Send + Sync>>,
    name: String,
}

impl DelegatingAgentBuilder {
    /// Create a new builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            sub_agents: HashMap::new(),
            router: None,
            name: name.into(),
        }
    }

    /// Add a sub-agent
    pub fn add_agent(mut self, key: impl Into<String>, agent: Arc<dyn ChatAgent>) -> Self {
        self.sub_agents.insert(key.into(), agent);
        self
    }

    /// Set the routing function
    ///
    /// The router receives the incoming conversation and returns the key of
    /// the agent that should handle it.
    pub fn router<F>(mut self, router: F) -> Self
    where
        F: Fn(&[ChatMessage]) -> String + Send + Sync + 'static,
    {
        self.router = Some(Box::new(router));
        self
    }

    /// Build the delegating agent
    ///
    /// # Errors
    ///
    /// Returns an error if no router function is set or no sub-agents are
    /// added.
    pub fn build(self) -> Result<DelegatingAgent> {
        let router = self
            .router
            .ok_or_else(|| Error::InitializationFailed("Router function not set".to_string()))?;

        if self.sub_agents.is_empty() {
            return Err(Error::InitializationFailed(
                "No sub-agents added".to_string(),
            ));
        }

        Ok(DelegatingAgent {
            sub_agents: self.sub_agents,
            router,
            name: self.name,
        })
    }
}
