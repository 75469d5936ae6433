//! Approval-protocol translator for gatehouse
//!
//! Generic tool-calling clients know nothing about the native approval
//! content a gatehouse agent emits for gated tools. This crate bridges the
//! two representations around a single agent invocation:
//!
//! - **Outbound** (agent → client): native approval requests in the update
//!   stream are rewritten into synthetic `request_approval` tool calls any
//!   tool-capable UI can render.
//! - **Inbound** (client → agent): echoed `request_approval` tool calls and
//!   the user's tool-result decisions are rewritten back into the native
//!   approval request/response records before the wrapped agent runs.
//!
//! Both passes are pure rewrites: order-preserving, exactly-once, and free
//! of side effects beyond a correlation map that lives for one inbound scan.
//! [`ApprovalGateAgent`] composes the two around an inner [`ChatAgent`].
//!
//! [`ChatAgent`]: gatehouse_core::ChatAgent

pub mod agent;
pub mod error;
pub mod inbound;
pub mod outbound;
pub mod protocol;

pub use agent::ApprovalGateAgent;
pub use error::ProtocolError;
pub use inbound::translate_inbound;
pub use outbound::translate_update;
pub use protocol::{ApprovalDecisionBody, ApprovalRequestBody, REQUEST_APPROVAL};
