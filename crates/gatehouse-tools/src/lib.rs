//! Tool framework for gatehouse
//!
//! Tools are named operations an agent can invoke. Each tool describes its
//! input with a JSON schema and may declare that execution requires human
//! approval, in which case the run loop emits an approval request instead of
//! executing it.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::{schema, Tool, ToolSpec};
