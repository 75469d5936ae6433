//! Insurance claims scenario
//!
//! Damage, coverage, and fraud reviewers examine the claim concurrently;
//! a senior adjuster synthesizes their reports into one recommendation.

use crate::error::Result;
use crate::prompts::{system, user};
use gatehouse_core::{ChatAgent, ChatMessage};
use gatehouse_runtime::{ChatClientAgent, Runtime};
use gatehouse_workflow::Concurrent;
use std::sync::Arc;

/// Fan-out/fan-in claims review
pub struct ClaimsReview {
    reviewers: Concurrent,
    adjuster: ChatClientAgent,
}

impl ClaimsReview {
    /// Build the reviewer fan-out and the adjuster from the runtime
    pub fn new(runtime: &Runtime) -> Result<Self> {
        let reviewers = Concurrent::builder()
            .add_agent(
                "damage",
                Arc::new(runtime.create_agent("claims-damage", system::CLAIMS_DAMAGE)),
            )
            .add_agent(
                "coverage",
                Arc::new(runtime.create_agent("claims-coverage", system::CLAIMS_COVERAGE)),
            )
            .add_agent(
                "fraud",
                Arc::new(runtime.create_agent("claims-fraud", system::CLAIMS_FRAUD)),
            )
            .build()?;

        let adjuster = runtime.create_agent("claims-adjuster", system::CLAIMS_ADJUSTER);

        Ok(Self {
            reviewers,
            adjuster,
        })
    }

    /// Review one claim and return the adjuster's recommendation
    pub async fn run(
        &self,
        claim_id: &str,
        policy_number: &str,
        description: &str,
    ) -> Result<String> {
        let packet = user::claim_packet(claim_id, policy_number, description)?;
        let results = self
            .reviewers
            .execute(vec![ChatMessage::user(packet)])
            .await?;

        let reports: Vec<user::LabeledReport> = results
            .into_iter()
            .map(|(label, response)| user::LabeledReport {
                label,
                body: response.text(),
            })
            .collect();

        let summary = user::adjuster_packet(claim_id, &reports)?;
        let response = self.adjuster.run(vec![ChatMessage::user(summary)]).await?;
        Ok(response.text())
    }
}
