//! Human-in-the-loop agent scenarios
//!
//! This crate wires the gatehouse framework crates into a handful of
//! financial-services scenarios:
//!
//! - Loan pipeline: sequential intake → credit assessment → decision draft
//! - Insurance claims: concurrent specialist reviews synthesized by an
//!   adjuster
//! - Banking triage: JSON classification with a documented fallback, routed
//!   to department agents
//! - Customer support: multi-turn chat over a per-customer conversation
//!   store
//! - Operations walkthrough: a gated account freeze behind the approval
//!   protocol
//!
//! The scenario types are thin executors; the orchestration, approval
//! translation, and run-loop logic live in the framework crates.

pub mod conversation;
pub mod error;
pub mod prompts;
pub mod scenarios;
pub mod tools;
pub mod triage;

// Re-export main types for convenience
pub use conversation::ConversationStore;
pub use error::{DemoError, Result};
pub use scenarios::{
    BankingTriage, ClaimsReview, LoanPipeline, OperationsDesk, SupportDesk, TriageOutcome,
    WalkthroughReport,
};
pub use triage::{parse_triage, parse_triage_or_default, Department, Priority, TriageResult};
