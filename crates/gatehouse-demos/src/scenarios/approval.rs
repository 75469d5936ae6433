//! Operations walkthrough scenario
//!
//! Drives one full approval round trip through the protocol translator: the
//! operations agent decides to freeze an account, the gated call surfaces as
//! a synthetic `request_approval` tool call, the "client" answers with a
//! decision payload, and the resumed run executes or declines the freeze.

use crate::error::{DemoError, Result};
use crate::prompts::system;
use crate::tools::{AccountDirectoryTool, FreezeAccountTool};
use gatehouse_approval::{ApprovalDecisionBody, ApprovalGateAgent, ApprovalRequestBody, REQUEST_APPROVAL};
use gatehouse_chat::ChatClient;
use gatehouse_core::{AgentRunResponse, ChatAgent, ChatMessage, Content};
use gatehouse_runtime::Runtime;
use gatehouse_tools::ToolRegistry;
use std::sync::Arc;

/// What one walkthrough produced
#[derive(Debug)]
pub struct WalkthroughReport {
    /// The wire-shape request the client was shown
    pub request: ApprovalRequestBody,
    /// The decision that was returned
    pub approved: bool,
    /// The agent's closing summary
    pub outcome: String,
}

/// Operations agent with a gated account freeze, behind the approval gate
pub struct OperationsDesk {
    gate: ApprovalGateAgent,
    freeze: Arc<FreezeAccountTool>,
}

impl OperationsDesk {
    /// Build the desk around the given chat client
    pub fn new(client: Arc<dyn ChatClient>) -> Result<Self> {
        let freeze = Arc::new(FreezeAccountTool::new());

        let tools = Arc::new(ToolRegistry::new());
        tools.register(Arc::new(AccountDirectoryTool));
        tools.register(freeze.clone());

        let runtime = Runtime::builder().client(client).tools(tools).build()?;
        let gate = runtime.create_gated_agent("operations", system::OPERATIONS_AGENT);

        Ok(Self { gate, freeze })
    }

    /// Check whether the desk has frozen the given account
    pub fn is_frozen(&self, account_id: &str) -> bool {
        self.freeze.is_frozen(account_id)
    }

    /// Run the full request/decision round trip for one instruction
    pub async fn run_walkthrough(
        &self,
        instruction: &str,
        approve: bool,
    ) -> Result<WalkthroughReport> {
        let mut history = vec![ChatMessage::user(instruction)];

        // First pass: the gated call surfaces as a synthetic tool call.
        let response = self.gate.run(history.clone()).await?;
        let (call_id, request) = find_approval_call(&response)?;
        history.extend(response.messages.iter().cloned());

        // The client's decision comes back as an ordinary tool result.
        let decision = ApprovalDecisionBody {
            approval_id: request.approval_id.clone(),
            approved: approve,
        };
        history.push(ChatMessage::function_result(
            call_id,
            serde_json::to_value(&decision)?,
        ));

        // Second pass: the translator pairs the decision with the request
        // and the run loop resumes the pending call.
        let final_response = self.gate.run(history).await?;

        Ok(WalkthroughReport {
            request,
            approved: approve,
            outcome: final_response.text(),
        })
    }
}

/// Find the synthetic approval call in a run response
fn find_approval_call(response: &AgentRunResponse) -> Result<(String, ApprovalRequestBody)> {
    for message in &response.messages {
        for content in &message.contents {
            if let Content::FunctionCall {
                call_id,
                name,
                arguments,
            } = content
            {
                if name == REQUEST_APPROVAL {
                    let request = arguments
                        .get("request")
                        .cloned()
                        .ok_or_else(|| {
                            DemoError::Scenario(
                                "approval call carried no request payload".to_string(),
                            )
                        })?;
                    return Ok((call_id.clone(), serde_json::from_value(request)?));
                }
            }
        }
    }

    Err(DemoError::Scenario(
        "agent ended the turn without requesting approval".to_string(),
    ))
}
