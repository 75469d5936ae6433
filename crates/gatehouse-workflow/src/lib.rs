//! Multi-agent composition for gatehouse
//!
//! Three composition shapes cover the scenario programs: sequential
//! pipelines (with nesting), fan-out/fan-in over a set of specialists, and
//! round-robin group chat with a bounded number of rounds.

pub mod concurrent;
pub mod group;
pub mod workflow;

// Re-export for convenience
pub use concurrent::{Concurrent, ConcurrentBuilder};
pub use group::{RoundRobin, RoundRobinBuilder};
pub use workflow::{Workflow, WorkflowBuilder, WorkflowStep};
