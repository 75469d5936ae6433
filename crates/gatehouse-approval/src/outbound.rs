//! Outbound translation (agent → client)
//!
//! Each streaming fragment is rewritten independently, in arrival order,
//! with no buffering: native approval requests become synthetic
//! `request_approval` tool calls; all other content passes through. The
//! rebuilt fragment keeps the original role, identifiers, timestamp, and
//! metadata.

use crate::protocol::{ApprovalRequestBody, REQUEST_APPROVAL, REQUEST_ARGUMENT};
use gatehouse_core::{AgentRunUpdate, Content};
use serde_json::json;

/// Rewrite one streaming fragment for a generic tool-calling client
///
/// The synthetic call reuses the approval id as its call id, so the
/// correlation survives clients that echo tool calls verbatim.
pub fn translate_update(mut update: AgentRunUpdate) -> AgentRunUpdate {
    for content in &mut update.contents {
        if let Content::ApprovalRequest(request) = content {
            let body = ApprovalRequestBody::from_native(request);
            *content = Content::function_call(
                request.id.clone(),
                REQUEST_APPROVAL,
                json!({ (REQUEST_ARGUMENT): body }),
            );
        }
    }
    update
}
