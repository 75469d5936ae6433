//! Runtime for executing agents with shared dependencies
//!
//! The Runtime owns the resources every agent needs - the chat client and
//! the tool registry - and provides factory methods for the agent shapes the
//! scenario programs use.

use crate::executor::{AgentConfig, ChatClientAgent};
use gatehouse_approval::ApprovalGateAgent;
use gatehouse_chat::ChatClient;
use gatehouse_core::{ChatAgent, Error, Result};
use gatehouse_tools::ToolRegistry;
use std::sync::Arc;

/// Configuration for the runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Default maximum iterations for tool-using agents
    pub default_max_iterations: usize,

    /// Default model to use
    pub default_model: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_max_iterations: 10,
            default_model: "gpt-4o".to_string(),
        }
    }
}

/// Runtime holding shared agent dependencies
///
/// # Example
///
/// ```no_run
/// use gatehouse_runtime::Runtime;
/// use gatehouse_tools::ToolRegistry;
/// use std::sync::Arc;
///
/// # fn example(client: Arc<dyn gatehouse_chat::ChatClient>) -> gatehouse_core::Result<()> {
/// let runtime = Runtime::builder()
///     .client(client)
///     .tools(Arc::new(ToolRegistry::new()))
///     .build()?;
///
/// let agent = runtime.create_agent("assistant", "You are a helpful assistant.");
/// # Ok(())
/// # }
/// ```
pub struct Runtime {
    client: Arc<dyn ChatClient>,
    tools: Arc<ToolRegistry>,
    config: RuntimeConfig,
}

impl Runtime {
    /// Create a new runtime
    pub fn new(
        client: Arc<dyn ChatClient>,
        tools: Arc<ToolRegistry>,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            client,
            tools,
            config,
        }
    }

    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a reference to the chat client
    pub fn client(&self) -> &Arc<dyn ChatClient> {
        &self.client
    }

    /// Get a reference to the tool registry
    pub fn tools(&self) -> &Arc<ToolRegistry> {
        &self.tools
    }

    /// Get a reference to the runtime configuration
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Default agent configuration derived from the runtime defaults
    pub fn agent_config(&self) -> AgentConfig {
        AgentConfig {
            max_iterations: self.config.default_max_iterations,
            model: self.config.default_model.clone(),
            ..AgentConfig::default()
        }
    }

    /// Create a chat-client agent with the given instructions
    pub fn create_agent(
        &self,
        name: impl Into<String>,
        instructions: impl Into<String>,
    ) -> ChatClientAgent {
        let mut config = self.agent_config();
        config.instructions = Some(instructions.into());
        self.create_agent_with_config(name, config)
    }

    /// Create a chat-client agent with explicit configuration
    pub fn create_agent_with_config(
        &self,
        name: impl Into<String>,
        config: AgentConfig,
    ) -> ChatClientAgent {
        ChatClientAgent::new(self.client.clone(), self.tools.clone(), config, name.into())
    }

    /// Create a chat-client agent wrapped in the approval protocol
    ///
    /// The returned agent exposes gated tool calls as synthetic
    /// `request_approval` tool calls to generic clients.
    pub fn create_gated_agent(
        &self,
        name: impl Into<String>,
        instructions: impl Into<String>,
    ) -> ApprovalGateAgent {
        let inner: Arc<dyn ChatAgent> = Arc::new(self.create_agent(name, instructions));
        ApprovalGateAgent::new(inner)
    }
}

/// Builder for Runtime
pub struct RuntimeBuilder {
    client: Option<Arc<dyn ChatClient>>,
    tools: Arc<ToolRegistry>,
    config: RuntimeConfig,
}

impl RuntimeBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            client: None,
            tools: Arc::new(ToolRegistry::new()),
            config: RuntimeConfig::default(),
        }
    }

    /// Set the chat client
    pub fn client(mut self, client: Arc<dyn ChatClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the tool registry
    pub fn tools(mut self, tools: Arc<ToolRegistry>) -> Self {
        self.tools = tools;
        self
    }

    /// Set the runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default model
    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.config.default_model = model.into();
        self
    }

    /// Build the runtime
    pub fn build(self) -> Result<Runtime> {
        let client = self
            .client
            .ok_or_else(|| Error::InitializationFailed("Chat client not set".to_string()))?;

        Ok(Runtime::new(client, self.tools, self.config))
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gatehouse_chat::{ChatError, ChatRequest, ChatResponse};

    struct NullClient;

    #[async_trait]
    impl ChatClient for NullClient {
        async fn complete(&self, _request: ChatRequest) -> gatehouse_chat::Result<ChatResponse> {
            Err(ChatError::RequestFailed("null client".to_string()))
        }

        fn name(&self) -> &str {
            "null"
        }
    }

    #[test]
    fn test_builder_requires_client() {
        assert!(Runtime::builder().build().is_err());
    }

    #[test]
    fn test_factory_applies_defaults() {
        let runtime = Runtime::builder()
            .client(Arc::new(NullClient))
            .default_model("local-model")
            .build()
            .expect("build");

        let agent = runtime.create_agent("assistant", "be brief");
        assert_eq!(agent.config().model, "local-model");
        assert_eq!(
            agent.config().instructions.as_deref(),
            Some("be brief")
        );
        assert_eq!(agent.name(), "assistant");
    }

    #[test]
    fn test_gated_agent_name() {
        let runtime = Runtime::builder()
            .client(Arc::new(NullClient))
            .build()
            .expect("build");

        let gate = runtime.create_gated_agent("ops", "handle operations");
        assert_eq!(gate.name(), "ops-approval-gate");
    }
}
