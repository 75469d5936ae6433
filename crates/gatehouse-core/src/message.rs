//! Conversation message types
//!
//! This module defines the message model shared by every gatehouse agent:
//! role-tagged messages carrying an ordered list of typed content items.
//! Function calls and results follow the tool-use shape used by chat
//! completion APIs; approval requests and responses are the native records
//! for the human-in-the-loop permission gate.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User message
    User,
    /// Assistant message
    Assistant,
    /// System message (handled separately in some providers)
    System,
}

/// A pending request for permission to execute a function
///
/// Created by the agent loop when a tool call targets a gated tool. The
/// record is immutable once created; it is resolved by a matching
/// [`FunctionApprovalResponse`] or left unresolved when the conversation
/// ends, which is a valid terminal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionApprovalRequest {
    /// Opaque unique approval identifier
    pub id: String,
    /// Name of the function awaiting approval
    pub function_name: String,
    /// Arguments the function would be invoked with
    pub arguments: Value,
}

impl FunctionApprovalRequest {
    /// Create a new approval request
    pub fn new(
        id: impl Into<String>,
        function_name: impl Into<String>,
        arguments: Value,
    ) -> Self {
        Self {
            id: id.into(),
            function_name: function_name.into(),
            arguments,
        }
    }
}

/// The user's decision on a pending approval request
///
/// Pairs the originating request with the decided boolean so the agent loop
/// can resume the gated call without additional lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionApprovalResponse {
    /// Whether execution was approved
    pub approved: bool,
    /// The request this decision answers
    pub request: FunctionApprovalRequest,
}

impl FunctionApprovalResponse {
    /// Create a response for the given request
    pub fn new(request: FunctionApprovalRequest, approved: bool) -> Self {
        Self { approved, request }
    }
}

/// Content item in a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    /// Plain text content
    Text {
        /// Text content
        text: String,
    },

    /// Function call emitted by the assistant
    FunctionCall {
        /// Correlation id for this call
        call_id: String,
        /// Function name
        name: String,
        /// Function arguments (JSON object)
        arguments: Value,
    },

    /// Result of a function call, fed back into the conversation
    FunctionResult {
        /// Correlation id of the call this answers
        call_id: String,
        /// Result payload
        output: Value,
    },

    /// Native approval request for a gated function call
    ApprovalRequest(FunctionApprovalRequest),

    /// Native approval decision for a previously issued request
    ApprovalResponse(FunctionApprovalResponse),
}

impl Content {
    /// Create a text content item
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create a function call content item
    pub fn function_call(
        call_id: impl Into<String>,
        name: impl Into<String>,
        arguments: Value,
    ) -> Self {
        Self::FunctionCall {
            call_id: call_id.into(),
            name: name.into(),
            arguments,
        }
    }

    /// Create a function result content item
    pub fn function_result(call_id: impl Into<String>, output: Value) -> Self {
        Self::FunctionResult {
            call_id: call_id.into(),
            output,
        }
    }
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role
    pub role: Role,

    /// Ordered content items
    pub contents: Vec<Content>,
}

impl ChatMessage {
    /// Create a message with the given role and content items
    pub fn new(role: Role, contents: Vec<Content>) -> Self {
        Self { role, contents }
    }

    /// Create a user message with text
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![Content::text(text)])
    }

    /// Create an assistant message with text
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, vec![Content::text(text)])
    }

    /// Create a system message with text
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, vec![Content::text(text)])
    }

    /// Create a user message carrying one function result
    pub fn function_result(call_id: impl Into<String>, output: Value) -> Self {
        Self::new(Role::User, vec![Content::function_result(call_id, output)])
    }

    /// Extract the first text content item (convenience method)
    pub fn text(&self) -> Option<&str> {
        self.contents.iter().find_map(|c| match c {
            Content::Text { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// All function call items in this message
    pub fn function_calls(&self) -> Vec<&Content> {
        self.contents
            .iter()
            .filter(|c| matches!(c, Content::FunctionCall { .. }))
            .collect()
    }

    /// All native approval responses in this message
    pub fn approval_responses(&self) -> Vec<&FunctionApprovalResponse> {
        self.contents
            .iter()
            .filter_map(|c| match c {
                Content::ApprovalResponse(resp) => Some(resp),
                _ => None,
            })
            .collect()
    }

    /// Check whether this message contains any function calls
    pub fn has_function_calls(&self) -> bool {
        !self.function_calls().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message() {
        let msg = ChatMessage::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text(), Some("Hello"));
    }

    #[test]
    fn test_function_result_message() {
        let msg = ChatMessage::function_result("call_1", json!({"ok": true}));
        assert_eq!(msg.role, Role::User);
        assert!(!msg.has_function_calls());
    }

    #[test]
    fn test_function_call_accessors() {
        let msg = ChatMessage::new(
            Role::Assistant,
            vec![
                Content::text("Let me check."),
                Content::function_call("call_1", "lookup_account", json!({"id": "a-1"})),
            ],
        );
        assert!(msg.has_function_calls());
        assert_eq!(msg.function_calls().len(), 1);
        assert_eq!(msg.text(), Some("Let me check."));
    }

    #[test]
    fn test_approval_response_accessor() {
        let request = FunctionApprovalRequest::new("ap-1", "freeze_account", json!({}));
        let msg = ChatMessage::new(
            Role::User,
            vec![Content::ApprovalResponse(FunctionApprovalResponse::new(
                request, true,
            ))],
        );
        let responses = msg.approval_responses();
        assert_eq!(responses.len(), 1);
        assert!(responses[0].approved);
        assert_eq!(responses[0].request.id, "ap-1");
    }

    #[test]
    fn test_message_serialization() {
        let msg = ChatMessage::user("Test");
        let encoded = serde_json::to_string(&msg).expect("serialize");
        let decoded: ChatMessage = serde_json::from_str(&encoded).expect("deserialize");
        assert_eq!(decoded.text(), Some("Test"));
    }

    #[test]
    fn test_approval_content_round_trip() {
        let content = Content::ApprovalRequest(FunctionApprovalRequest::new(
            "ap-2",
            "wire_transfer",
            json!({"amount": 250}),
        ));
        let encoded = serde_json::to_value(&content).expect("serialize");
        assert_eq!(encoded["type"], "approval_request");
        let decoded: Content = serde_json::from_value(encoded).expect("deserialize");
        assert_eq!(decoded, content);
    }
}
