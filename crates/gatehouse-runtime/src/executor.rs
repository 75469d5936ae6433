//! Chat-client agent loop
//!
//! `ChatClientAgent` implements the core run loop:
//! 1. Resolve any incoming approval decisions (execute approved calls,
//!    decline rejected ones)
//! 2. Call the chat client with conversation history and available tools
//! 3. Check the stop reason
//! 4. If tool use was requested, execute ungated tools and loop back;
//!    a gated tool ends the turn with a native approval request instead
//! 5. If completed, finish the stream

use async_trait::async_trait;
use futures::channel::mpsc;
use futures::StreamExt;
use gatehouse_chat::{ChatClient, ChatRequest, StopReason};
use gatehouse_core::{
    AgentRunStream, AgentRunUpdate, ChatAgent, ChatMessage, Content, Error,
    FunctionApprovalRequest, Result, Role,
};
use gatehouse_tools::ToolRegistry;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Configuration for a chat-client agent
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Maximum number of loop iterations (prevents infinite loops)
    pub max_iterations: usize,

    /// Model to use
    pub model: String,

    /// System instructions
    pub instructions: Option<String>,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature
    pub temperature: Option<f32>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            model: "gpt-4o".to_string(),
            instructions: None,
            max_tokens: 4096,
            temperature: Some(0.7),
        }
    }
}

/// An agent that drives a chat client with tool execution and approval
/// gating
///
/// Ungated tools execute inline. A tool whose `requires_approval()` is true
/// is never executed directly: the loop emits a native approval request
/// (approval id = tool call id) and ends the turn. On a later run, incoming
/// approval responses resume the pending call - approved calls execute and
/// feed their result back, rejected calls feed back a declined result.
pub struct ChatClientAgent {
    client: Arc<dyn ChatClient>,
    tools: Arc<ToolRegistry>,
    config: AgentConfig,
    name: String,
}

impl ChatClientAgent {
    /// Create a new chat-client agent
    pub fn new(
        client: Arc<dyn ChatClient>,
        tools: Arc<ToolRegistry>,
        config: AgentConfig,
        name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            tools,
            config,
            name: name.into(),
        }
    }

    /// Create a builder
    pub fn builder() -> ChatClientAgentBuilder {
        ChatClientAgentBuilder::new()
    }

    /// Get the agent's configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}

#[async_trait]
impl ChatAgent for ChatClientAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run_stream(&self, messages: Vec<ChatMessage>) -> Result<AgentRunStream> {
        let (tx, rx) = mpsc::unbounded();
        let client = self.client.clone();
        let tools = self.tools.clone();
        let config = self.config.clone();
        let name = self.name.clone();

        tokio::spawn(async move {
            let outcome = drive(client, tools, config, messages, &tx).await;
            if let Err(err) = outcome {
                warn!(agent = %name, "agent run failed: {err}");
                // Receiver may already be gone; nothing left to do then.
                let _ = tx.unbounded_send(Err(err));
            }
        });

        Ok(rx.boxed())
    }
}

type UpdateSender = mpsc::UnboundedSender<Result<AgentRunUpdate>>;

/// Run the agent loop, emitting updates as they are produced
async fn drive(
    client: Arc<dyn ChatClient>,
    tools: Arc<ToolRegistry>,
    config: AgentConfig,
    messages: Vec<ChatMessage>,
    tx: &UpdateSender,
) -> Result<()> {
    let response_id = Uuid::new_v4().to_string();
    let mut conversation = resolve_approvals(&tools, messages, &response_id, tx).await?;

    for iteration in 1..=config.max_iterations {
        info!("Agent iteration {}/{}", iteration, config.max_iterations);

        let specs = tools.specs();
        debug!("Available tools: {}", specs.len());

        let mut builder = ChatRequest::builder(&config.model)
            .messages(conversation.clone())
            .max_tokens(config.max_tokens);
        if let Some(instructions) = config.instructions.clone() {
            builder = builder.system(instructions);
        }
        if let Some(temperature) = config.temperature {
            builder = builder.temperature(temperature);
        }
        if !specs.is_empty() {
            builder = builder.tools(specs);
        }

        let response = client
            .complete(builder.build())
            .await
            .map_err(|e| Error::RunFailed(e.to_string()))?;

        debug!(
            "Chat response - stop_reason: {:?}, tokens: {}",
            response.stop_reason,
            response.usage.total()
        );

        match response.stop_reason {
            StopReason::EndTurn | StopReason::MaxTokens => {
                if response.stop_reason == StopReason::MaxTokens {
                    warn!("Hit max tokens in chat response");
                }
                emit(tx, assistant_update(&response_id, response.message.contents))?;
                return Ok(());
            }

            StopReason::ToolUse => {
                let (emitted, calls) = gate_contents(&tools, response.message.contents.clone());
                let pending_approval = emitted
                    .iter()
                    .any(|c| matches!(c, Content::ApprovalRequest(_)));

                conversation.push(response.message);
                emit(tx, assistant_update(&response_id, emitted))?;

                for (call_id, name, arguments) in calls {
                    let output = execute_tool(&tools, &name, &arguments).await?;
                    emit(
                        tx,
                        user_update(
                            &response_id,
                            vec![Content::function_result(call_id.clone(), output.clone())],
                        ),
                    )?;
                    conversation.push(ChatMessage::function_result(call_id, output));
                }

                // A gated call needs a human decision before the model can
                // continue; the pending request lives in the emitted stream.
                if pending_approval {
                    return Ok(());
                }
            }
        }
    }

    warn!(
        "Max iterations ({}) reached, stopping",
        config.max_iterations
    );
    emit(
        tx,
        assistant_update(
            &response_id,
            vec![Content::text("Max iterations reached without completion")],
        ),
    )?;
    Ok(())
}

/// Resolve incoming approval content before the first completion round
///
/// Approval requests that were answered later in the history are rehydrated
/// into the function calls they stand for; each response executes (or
/// declines) its pending call and becomes the matching function result.
/// Unanswered requests stay as they are - an unresolved approval is a valid
/// terminal state, and the chat wire layer skips it.
async fn resolve_approvals(
    tools: &ToolRegistry,
    messages: Vec<ChatMessage>,
    response_id: &str,
    tx: &UpdateSender,
) -> Result<Vec<ChatMessage>> {
    let answered: HashSet<String> = messages
        .iter()
        .flat_map(|m| m.approval_responses())
        .map(|r| r.request.id.clone())
        .collect();

    let mut out = Vec::with_capacity(messages.len());
    for mut message in messages {
        for content in &mut message.contents {
            match content {
                Content::ApprovalRequest(request) if answered.contains(&request.id) => {
                    *content = Content::function_call(
                        request.id.clone(),
                        request.function_name.clone(),
                        request.arguments.clone(),
                    );
                }

                Content::ApprovalResponse(response) => {
                    let output = if response.approved {
                        info!("Executing approved call: {}", response.request.function_name);
                        execute_tool(tools, &response.request.function_name, &response.request.arguments)
                            .await?
                    } else {
                        info!("Declining call: {}", response.request.function_name);
                        json!({"error": "Execution was declined by the user"})
                    };
                    emit(
                        tx,
                        user_update(
                            response_id,
                            vec![Content::function_result(
                                response.request.id.clone(),
                                output.clone(),
                            )],
                        ),
                    )?;
                    *content =
                        Content::function_result(response.request.id.clone(), output);
                }

                _ => {}
            }
        }
        out.push(message);
    }

    Ok(out)
}

/// Split an assistant message into what gets emitted and what gets executed
///
/// Gated calls are replaced by native approval requests in the emitted
/// contents; ungated calls are returned for execution.
fn gate_contents(
    tools: &ToolRegistry,
    contents: Vec<Content>,
) -> (Vec<Content>, Vec<(String, String, Value)>) {
    let mut emitted = Vec::with_capacity(contents.len());
    let mut calls = Vec::new();

    for content in contents {
        match content {
            Content::FunctionCall {
                call_id,
                name,
                arguments,
            } => {
                let gated = tools
                    .get(&name)
                    .is_some_and(|tool| tool.requires_approval());
                if gated {
                    info!("Gating call to '{name}' behind approval");
                    emitted.push(Content::ApprovalRequest(FunctionApprovalRequest::new(
                        call_id, name, arguments,
                    )));
                } else {
                    calls.push((call_id.clone(), name.clone(), arguments.clone()));
                    emitted.push(Content::FunctionCall {
                        call_id,
                        name,
                        arguments,
                    });
                }
            }
            other => emitted.push(other),
        }
    }

    (emitted, calls)
}

/// Execute one tool call, mapping execution failure into an error result
async fn execute_tool(tools: &ToolRegistry, name: &str, arguments: &Value) -> Result<Value> {
    let tool = tools
        .get(name)
        .ok_or_else(|| Error::RunFailed(format!("Tool not found: {name}")))?;

    match tool.execute(arguments.clone()).await {
        Ok(output) => {
            debug!("Tool {name} succeeded");
            Ok(output)
        }
        Err(e) => {
            warn!("Tool {name} execution failed: {e}");
            Ok(json!({"error": e.to_string()}))
        }
    }
}

fn assistant_update(response_id: &str, contents: Vec<Content>) -> AgentRunUpdate {
    AgentRunUpdate::new(Role::Assistant, contents).with_response_id(response_id)
}

fn user_update(response_id: &str, contents: Vec<Content>) -> AgentRunUpdate {
    AgentRunUpdate::new(Role::User, contents).with_response_id(response_id)
}

fn emit(tx: &UpdateSender, update: AgentRunUpdate) -> Result<()> {
    tx.unbounded_send(Ok(update))
        .map_err(|_| Error::RunFailed("update stream closed".to_string()))
}

/// Builder for ChatClientAgent
pub struct ChatClientAgentBuilder {
    client: Option<Arc<dyn ChatClient>>,
    tools: Arc<ToolRegistry>,
    config: AgentConfig,
    name: String,
}

impl ChatClientAgentBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            client: None,
            tools: Arc::new(ToolRegistry::new()),
            config: AgentConfig::default(),
            name: "agent".to_string(),
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

    /// Set the full configuration
    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the agent name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system instructions
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.config.instructions = Some(instructions.into());
        self
    }

    /// Set maximum iterations
    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    /// Build the agent
    pub fn build(self) -> Result<ChatClientAgent> {
        let client = self
            .client
            .ok_or_else(|| Error::InitializationFailed("Chat client not set".to_string()))?;

        Ok(ChatClientAgent::new(
            client, self.tools, self.config, self.name,
        ))
    }
}

impl Default for ChatClientAgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gatehouse_chat::{ChatResponse, TokenUsage};
    use gatehouse_tools::{schema, Tool};
    use std::sync::Mutex;

    /// Chat client that replays a fixed sequence of responses
    struct ScriptedClient {
        responses: Mutex<Vec<ChatResponse>>,
    }

    impl ScriptedClient {
        fn new(mut responses: Vec<ChatResponse>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait]
    impl ChatClient for ScriptedClient {
        async fn complete(
            &self,
            _request: ChatRequest,
        ) -> gatehouse_chat::Result<ChatResponse> {
            self.responses
                .lock()
                .map_err(|e| gatehouse_chat::ChatError::RequestFailed(e.to_string()))?
                .pop()
                .ok_or_else(|| {
                    gatehouse_chat::ChatError::RequestFailed("script exhausted".to_string())
                })
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn text_response(text: &str) -> ChatResponse {
        ChatResponse {
            message: ChatMessage::assistant(text),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage {
                input_tokens: 1,
                output_tokens: 1,
            },
        }
    }

    fn tool_response(call_id: &str, name: &str, arguments: Value) -> ChatResponse {
        ChatResponse {
            message: ChatMessage::new(
                Role::Assistant,
                vec![Content::function_call(call_id, name, arguments)],
            ),
            stop_reason: StopReason::ToolUse,
            usage: TokenUsage {
                input_tokens: 1,
                output_tokens: 1,
            },
        }
    }

    struct CountingTool {
        name: &'static str,
        gated: bool,
        executions: Arc<Mutex<usize>>,
    }

    #[async_trait]
    impl Tool for CountingTool {
        async fn execute(&self, _params: Value) -> Result<Value> {
            *self.executions.lock().map_err(|e| Error::Generic(e.to_string()))? += 1;
            Ok(json!({"status": "done"}))
        }

        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "counting test tool"
        }

        fn input_schema(&self) -> Value {
            schema::object(json!({}), vec![])
        }

        fn requires_approval(&self) -> bool {
            self.gated
        }
    }

    fn agent_with(
        responses: Vec<ChatResponse>,
        tools: Arc<ToolRegistry>,
    ) -> ChatClientAgent {
        ChatClientAgent::new(
            Arc::new(ScriptedClient::new(responses)),
            tools,
            AgentConfig::default(),
            "test-agent",
        )
    }

    #[tokio::test]
    async fn test_plain_completion() {
        let agent = agent_with(
            vec![text_response("hello")],
            Arc::new(ToolRegistry::new()),
        );

        let response = agent.run(vec![ChatMessage::user("hi")]).await.expect("run");
        assert_eq!(response.text(), "hello");
    }

    #[tokio::test]
    async fn test_ungated_tool_executes_and_loops() {
        let executions = Arc::new(Mutex::new(0));
        let tools = Arc::new(ToolRegistry::new());
        tools.register(Arc::new(CountingTool {
            name: "lookup_account",
            gated: false,
            executions: executions.clone(),
        }));

        let agent = agent_with(
            vec![
                tool_response("c1", "lookup_account", json!({"id": "a-1"})),
                text_response("the account is fine"),
            ],
            tools,
        );

        let response = agent.run(vec![ChatMessage::user("check a-1")]).await.expect("run");
        assert_eq!(*executions.lock().expect("lock"), 1);
        assert_eq!(response.text(), "the account is fine");
    }

    #[tokio::test]
    async fn test_gated_tool_emits_approval_request_and_ends_turn() {
        let executions = Arc::new(Mutex::new(0));
        let tools = Arc::new(ToolRegistry::new());
        tools.register(Arc::new(CountingTool {
            name: "freeze_account",
            gated: true,
            executions: executions.clone(),
        }));

        let agent = agent_with(
            vec![tool_response("c1", "freeze_account", json!({"id": "a-1"}))],
            tools,
        );

        let response = agent
            .run(vec![ChatMessage::user("freeze a-1")])
            .await
            .expect("run");

        // never executed, script's second response never needed
        assert_eq!(*executions.lock().expect("lock"), 0);

        let request = response
            .messages
            .iter()
            .flat_map(|m| m.contents.iter())
            .find_map(|c| match c {
                Content::ApprovalRequest(request) => Some(request),
                _ => None,
            })
            .expect("approval request emitted");
        assert_eq!(request.id, "c1");
        assert_eq!(request.function_name, "freeze_account");
    }

    #[tokio::test]
    async fn test_approved_response_resumes_pending_call() {
        let executions = Arc::new(Mutex::new(0));
        let tools = Arc::new(ToolRegistry::new());
        tools.register(Arc::new(CountingTool {
            name: "freeze_account",
            gated: true,
            executions: executions.clone(),
        }));

        let agent = agent_with(vec![text_response("account frozen")], tools);

        let request = FunctionApprovalRequest::new("c1", "freeze_account", json!({"id": "a-1"}));
        let history = vec![
            ChatMessage::user("freeze a-1"),
            ChatMessage::new(
                Role::Assistant,
                vec![Content::ApprovalRequest(request.clone())],
            ),
            ChatMessage::new(
                Role::User,
                vec![Content::ApprovalResponse(
                    gatehouse_core::FunctionApprovalResponse::new(request, true),
                )],
            ),
        ];

        let response = agent.run(history).await.expect("run");
        assert_eq!(*executions.lock().expect("lock"), 1);
        assert_eq!(response.text(), "account frozen");

        // the executed result is part of the streamed output
        let has_result = response
            .messages
            .iter()
            .flat_map(|m| m.contents.iter())
            .any(|c| matches!(c, Content::FunctionResult { call_id, .. } if call_id == "c1"));
        assert!(has_result);
    }

    #[tokio::test]
    async fn test_rejected_response_declines_pending_call() {
        let executions = Arc::new(Mutex::new(0));
        let tools = Arc::new(ToolRegistry::new());
        tools.register(Arc::new(CountingTool {
            name: "freeze_account",
            gated: true,
            executions: executions.clone(),
        }));

        let agent = agent_with(vec![text_response("understood, leaving it active")], tools);

        let request = FunctionApprovalRequest::new("c1", "freeze_account", json!({"id": "a-1"}));
        let history = vec![
            ChatMessage::new(
                Role::Assistant,
                vec![Content::ApprovalRequest(request.clone())],
            ),
            ChatMessage::new(
                Role::User,
                vec![Content::ApprovalResponse(
                    gatehouse_core::FunctionApprovalResponse::new(request, false),
                )],
            ),
        ];

        let response = agent.run(history).await.expect("run");
        assert_eq!(*executions.lock().expect("lock"), 0);

        let declined = response
            .messages
            .iter()
            .flat_map(|m| m.contents.iter())
            .find_map(|c| match c {
                Content::FunctionResult { output, .. } => Some(output),
                _ => None,
            })
            .expect("declined result emitted");
        assert_eq!(declined["error"], "Execution was declined by the user");
    }

    #[test]
    fn test_builder() {
        let builder = ChatClientAgent::builder()
            .model("test-model")
            .max_iterations(5)
            .instructions("Test prompt");

        assert_eq!(builder.config.model, "test-model");
        assert_eq!(builder.config.max_iterations, 5);
        assert_eq!(
            builder.config.instructions,
            Some("Test prompt".to_string())
        );
    }

    #[test]
    fn test_default_config() {
        let config = AgentConfig::default();
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.model, "gpt-4o");
    }
}
