//! Wire shapes of the approval protocol
//!
//! Two JSON records cross the client boundary: the request embedded in a
//! synthetic `request_approval` tool call, and the decision returned in the
//! matching tool result. Everything else about transport framing belongs to
//! the host process.

use gatehouse_core::FunctionApprovalRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reserved name of the synthetic approval tool call
pub const REQUEST_APPROVAL: &str = "request_approval";

/// Name of the single argument carried by a `request_approval` call
pub const REQUEST_ARGUMENT: &str = "request";

/// Wire shape of a pending approval request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalRequestBody {
    /// Opaque unique approval identifier
    pub approval_id: String,

    /// Name of the function awaiting approval
    pub function_name: String,

    /// Arguments the function would be invoked with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_arguments: Option<Value>,

    /// Human-readable prompt for the client UI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApprovalRequestBody {
    /// Build the wire shape for a native approval request
    ///
    /// The prompt message is always populated with the default wording so
    /// every client renders the same question.
    pub fn from_native(request: &FunctionApprovalRequest) -> Self {
        Self {
            approval_id: request.id.clone(),
            function_name: request.function_name.clone(),
            function_arguments: if request.arguments.is_null() {
                None
            } else {
                Some(request.arguments.clone())
            },
            message: Some(default_message(&request.function_name)),
        }
    }

    /// Convert the wire shape into the native record
    pub fn into_native(self) -> FunctionApprovalRequest {
        FunctionApprovalRequest {
            id: self.approval_id,
            function_name: self.function_name,
            arguments: self.function_arguments.unwrap_or(Value::Null),
        }
    }
}

/// Wire shape of the user's decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalDecisionBody {
    /// Identifier of the request this decision answers
    pub approval_id: String,

    /// Whether execution was approved
    pub approved: bool,
}

/// The default human-readable prompt for a request
pub fn default_message(function_name: &str) -> String {
    format!("Approve execution of '{function_name}'?")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_native_populates_message() {
        let native = FunctionApprovalRequest::new("a1", "Backup", json!({"target": "db1"}));
        let body = ApprovalRequestBody::from_native(&native);
        assert_eq!(body.approval_id, "a1");
        assert_eq!(body.function_name, "Backup");
        assert_eq!(body.function_arguments, Some(json!({"target": "db1"})));
        assert_eq!(body.message.as_deref(), Some("Approve execution of 'Backup'?"));
    }

    #[test]
    fn test_null_arguments_are_omitted() {
        let native = FunctionApprovalRequest::new("a1", "Backup", Value::Null);
        let body = ApprovalRequestBody::from_native(&native);
        assert!(body.function_arguments.is_none());

        let encoded = serde_json::to_value(&body).expect("serialize");
        assert!(encoded.get("function_arguments").is_none());
    }

    #[test]
    fn test_round_trip_native() {
        let native = FunctionApprovalRequest::new("a1", "Backup", json!({"target": "db1"}));
        let body = ApprovalRequestBody::from_native(&native);
        assert_eq!(body.into_native(), native);
    }

    #[test]
    fn test_decision_wire_shape() {
        let decision: ApprovalDecisionBody =
            serde_json::from_value(json!({"approval_id": "a1", "approved": true}))
                .expect("deserialize");
        assert_eq!(decision.approval_id, "a1");
        assert!(decision.approved);
    }
}
