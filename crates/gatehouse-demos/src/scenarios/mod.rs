//! Scenario executors
//!
//! One module per demonstration scenario. Each is a thin wrapper that
//! builds its agents from a [`Runtime`] and drives one of the composition
//! shapes from `gatehouse-workflow`.
//!
//! [`Runtime`]: gatehouse_runtime::Runtime

pub mod approval;
pub mod banking;
pub mod claims;
pub mod loan;
pub mod support;

pub use approval::{OperationsDesk, WalkthroughReport};
pub use banking::{BankingTriage, TriageOutcome};
pub use claims::ClaimsReview;
pub use loan::LoanPipeline;
pub use support::SupportDesk;
