//! Inbound translation (client → agent)
//!
//! One ordered pass over the conversation: synthetic `request_approval`
//! tool calls become native approval requests, and tool results answering a
//! tracked call become native approval responses. Everything else passes
//! through untouched. The correlation index lives only for the duration of
//! the pass.

use crate::error::ProtocolError;
use crate::protocol::{ApprovalDecisionBody, ApprovalRequestBody, REQUEST_APPROVAL, REQUEST_ARGUMENT};
use gatehouse_core::{ChatMessage, Content, FunctionApprovalRequest, FunctionApprovalResponse};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Rewrite a client conversation into the native approval representation
///
/// The output has the same length and ordering as the input. On a
/// [`ProtocolError`] no output is produced at all, so a malformed message
/// can never reach the wrapped agent half-translated.
///
/// A tool result whose call id was never tracked as a `request_approval`
/// call passes through unchanged: it is indistinguishable from an ordinary
/// tool result without sniffing its payload, and ordinary results are none
/// of this layer's business.
pub fn translate_inbound(messages: Vec<ChatMessage>) -> Result<Vec<ChatMessage>, ProtocolError> {
    let mut pending: HashMap<String, FunctionApprovalRequest> = HashMap::new();
    let mut out = messages;

    for message in &mut out {
        for content in &mut message.contents {
            match content {
                Content::FunctionCall {
                    call_id,
                    name,
                    arguments,
                } if name == REQUEST_APPROVAL => {
                    let native = decode_request(call_id, arguments)?;
                    pending.insert(call_id.clone(), native.clone());
                    *content = Content::ApprovalRequest(native);
                }

                Content::FunctionResult { call_id, output } => {
                    // Each tracked request is consumed by exactly one result.
                    if let Some(request) = pending.remove(call_id) {
                        let decision = decode_decision(call_id, output)?;
                        if decision.approval_id != request.id {
                            warn!(
                                call_id = %call_id,
                                expected = %request.id,
                                got = %decision.approval_id,
                                "approval decision names a different approval id than its call"
                            );
                        }
                        *content = Content::ApprovalResponse(FunctionApprovalResponse::new(
                            request,
                            decision.approved,
                        ));
                    }
                }

                _ => {}
            }
        }
    }

    Ok(out)
}

/// Decode the `request` argument of a `request_approval` call
fn decode_request(
    call_id: &str,
    arguments: &Value,
) -> Result<FunctionApprovalRequest, ProtocolError> {
    let request = arguments
        .get(REQUEST_ARGUMENT)
        .ok_or_else(|| ProtocolError::MissingRequest {
            call_id: call_id.to_string(),
        })?;

    let body: ApprovalRequestBody =
        serde_json::from_value(request.clone()).map_err(|source| ProtocolError::MalformedRequest {
            call_id: call_id.to_string(),
            source,
        })?;

    Ok(body.into_native())
}

/// Decode a decision payload
///
/// The payload is either the decision object itself or that object
/// serialized as a JSON string; both collapse into one decode step with a
/// single failure path.
fn decode_decision(call_id: &str, output: &Value) -> Result<ApprovalDecisionBody, ProtocolError> {
    let malformed = |source| ProtocolError::MalformedDecision {
        call_id: call_id.to_string(),
        source,
    };

    match output {
        Value::String(serialized) => serde_json::from_str(serialized).map_err(malformed),
        value => serde_json::from_value(value.clone()).map_err(malformed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_core::Role;
    use serde_json::json;

    fn approval_call(call_id: &str, approval_id: &str) -> Content {
        Content::function_call(
            call_id,
            REQUEST_APPROVAL,
            json!({
                "request": {
                    "approval_id": approval_id,
                    "function_name": "Backup",
                    "function_arguments": {"target": "db1"},
                    "message": "Approve execution of 'Backup'?",
                }
            }),
        )
    }

    #[test]
    fn test_non_approval_content_is_identity() {
        let messages = vec![
            ChatMessage::user("hello"),
            ChatMessage::new(
                Role::Assistant,
                vec![
                    Content::text("checking"),
                    Content::function_call("c1", "lookup_account", json!({"id": "a-1"})),
                ],
            ),
            ChatMessage::function_result("c1", json!({"balance": 12})),
        ];

        let translated = translate_inbound(messages.clone()).expect("translate");
        assert_eq!(translated, messages);
    }

    #[test]
    fn test_request_call_becomes_native_request() {
        let messages = vec![ChatMessage::new(
            Role::Assistant,
            vec![approval_call("c1", "a1")],
        )];

        let translated = translate_inbound(messages).expect("translate");
        assert_eq!(translated.len(), 1);
        match &translated[0].contents[0] {
            Content::ApprovalRequest(request) => {
                assert_eq!(request.id, "a1");
                assert_eq!(request.function_name, "Backup");
                assert_eq!(request.arguments, json!({"target": "db1"}));
            }
            other => panic!("expected approval request, got {other:?}"),
        }
    }

    #[test]
    fn test_response_pairs_with_tracked_request() {
        let messages = vec![
            ChatMessage::new(Role::Assistant, vec![approval_call("c1", "a1")]),
            ChatMessage::function_result("c1", json!({"approval_id": "a1", "approved": true})),
        ];

        let translated = translate_inbound(messages).expect("translate");
        match &translated[1].contents[0] {
            Content::ApprovalResponse(response) => {
                assert!(response.approved);
                assert_eq!(response.request.id, "a1");
                assert_eq!(response.request.function_name, "Backup");
            }
            other => panic!("expected approval response, got {other:?}"),
        }
    }

    #[test]
    fn test_stringified_decision_payload() {
        let messages = vec![
            ChatMessage::new(Role::Assistant, vec![approval_call("c1", "a1")]),
            ChatMessage::function_result("c1", json!(r#"{"approval_id":"a1","approved":false}"#)),
        ];

        let translated = translate_inbound(messages).expect("translate");
        match &translated[1].contents[0] {
            Content::ApprovalResponse(response) => assert!(!response.approved),
            other => panic!("expected approval response, got {other:?}"),
        }
    }

    #[test]
    fn test_unmatched_result_passes_through() {
        let messages = vec![ChatMessage::function_result(
            "never-seen",
            json!({"approval_id": "a9", "approved": true}),
        )];

        let translated = translate_inbound(messages.clone()).expect("translate");
        assert_eq!(translated, messages);
    }

    #[test]
    fn test_missing_request_argument_fails_closed() {
        let messages = vec![ChatMessage::new(
            Role::Assistant,
            vec![Content::function_call("c1", REQUEST_APPROVAL, json!({}))],
        )];

        let err = translate_inbound(messages).expect_err("must fail");
        assert!(matches!(err, ProtocolError::MissingRequest { ref call_id } if call_id == "c1"));
    }

    #[test]
    fn test_undecodable_request_fails_closed() {
        let messages = vec![ChatMessage::new(
            Role::Assistant,
            vec![Content::function_call(
                "c1",
                REQUEST_APPROVAL,
                json!({"request": {"function_name": 42}}),
            )],
        )];

        let err = translate_inbound(messages).expect_err("must fail");
        assert!(matches!(err, ProtocolError::MalformedRequest { .. }));
    }

    #[test]
    fn test_malformed_decision_fails_closed() {
        let messages = vec![
            ChatMessage::new(Role::Assistant, vec![approval_call("c1", "a1")]),
            ChatMessage::function_result("c1", json!("not a decision")),
        ];

        let err = translate_inbound(messages).expect_err("must fail");
        assert!(matches!(err, ProtocolError::MalformedDecision { .. }));
    }

    #[test]
    fn test_tracked_request_consumed_once() {
        let messages = vec![
            ChatMessage::new(Role::Assistant, vec![approval_call("c1", "a1")]),
            ChatMessage::function_result("c1", json!({"approval_id": "a1", "approved": true})),
            ChatMessage::function_result("c1", json!({"approval_id": "a1", "approved": false})),
        ];

        let translated = translate_inbound(messages).expect("translate");
        assert!(matches!(
            translated[1].contents[0],
            Content::ApprovalResponse(_)
        ));
        // the second result finds no tracked request and passes through
        assert!(matches!(
            translated[2].contents[0],
            Content::FunctionResult { .. }
        ));
    }

    #[test]
    fn test_ordering_and_length_preserved() {
        let messages = vec![
            ChatMessage::user("please back up db1"),
            ChatMessage::new(
                Role::Assistant,
                vec![Content::text("needs sign-off"), approval_call("c1", "a1")],
            ),
            ChatMessage::function_result("c1", json!({"approval_id": "a1", "approved": true})),
            ChatMessage::user("thanks"),
        ];

        let translated = translate_inbound(messages.clone()).expect("translate");
        assert_eq!(translated.len(), messages.len());
        assert_eq!(translated[0], messages[0]);
        assert_eq!(translated[3], messages[3]);
        assert_eq!(translated[1].contents[0], messages[1].contents[0]);
    }
}
