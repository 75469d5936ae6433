//! Loan pipeline scenario
//!
//! A three-step sequential pipeline: intake summarizes the raw application,
//! the credit assessor rates it, and the loan officer drafts the
//! customer-facing decision. Each step sees everything the previous steps
//! produced.

use crate::error::Result;
use crate::prompts::system;
use gatehouse_core::ChatMessage;
use gatehouse_runtime::Runtime;
use gatehouse_workflow::Workflow;
use std::sync::Arc;

/// Sequential loan processing pipeline
pub struct LoanPipeline {
    workflow: Workflow,
}

impl LoanPipeline {
    /// Build the pipeline agents from the runtime
    pub fn new(runtime: &Runtime) -> Result<Self> {
        let workflow = Workflow::builder()
            .add_agent(Arc::new(
                runtime.create_agent("loan-intake", system::LOAN_INTAKE),
            ))
            .add_agent(Arc::new(
                runtime.create_agent("credit-assessor", system::CREDIT_ASSESSOR),
            ))
            .add_agent(Arc::new(
                runtime.create_agent("loan-decision", system::LOAN_DECISION),
            ))
            .build()?;

        Ok(Self { workflow })
    }

    /// Process one raw application and return the decision letter
    pub async fn run(&self, application: &str) -> Result<String> {
        let response = self
            .workflow
            .execute(vec![ChatMessage::user(application)])
            .await?;
        Ok(response.text())
    }
}
