//! Banking triage scenario
//!
//! A triage agent classifies the customer message into a JSON
//! [`TriageResult`]; the classification routes the conversation to a
//! department specialist through a delegating agent. An undecodable
//! classification falls back to the general queue instead of failing the
//! turn.
//!
//! [`TriageResult`]: crate::triage::TriageResult

use crate::error::Result;
use crate::prompts::{system, user};
use crate::triage::{parse_triage_or_default, TriageResult};
use gatehouse_core::{ChatAgent, ChatMessage, Role};
use gatehouse_runtime::{ChatClientAgent, DelegatingAgent, Runtime};
use std::sync::Arc;

/// Outcome of one triaged customer message
#[derive(Debug)]
pub struct TriageOutcome {
    /// The (possibly fallback) classification
    pub triage: TriageResult,
    /// The department specialist's reply
    pub reply: String,
}

/// Triage-and-route front desk for a banking inbox
pub struct BankingTriage {
    triage: ChatClientAgent,
    departments: DelegatingAgent,
}

impl BankingTriage {
    /// Build the triage classifier and department agents from the runtime
    pub fn new(runtime: &Runtime) -> Result<Self> {
        let triage = runtime.create_agent("banking-triage", system::BANKING_TRIAGE);

        let departments = DelegatingAgent::builder("banking-departments")
            .add_agent(
                "cards",
                Arc::new(runtime.create_agent("dept-cards", system::DEPT_CARDS)),
            )
            .add_agent(
                "loans",
                Arc::new(runtime.create_agent("dept-loans", system::DEPT_LOANS)),
            )
            .add_agent(
                "fraud",
                Arc::new(runtime.create_agent("dept-fraud", system::DEPT_FRAUD)),
            )
            .add_agent(
                "general",
                Arc::new(runtime.create_agent("dept-general", system::DEPT_GENERAL)),
            )
            .router(|messages| {
                // The classification is the last assistant message; a
                // missing or undecodable one routes to the general queue.
                let classification = messages
                    .iter()
                    .rev()
                    .find(|m| m.role == Role::Assistant)
                    .and_then(|m| m.text())
                    .unwrap_or_default();
                parse_triage_or_default(classification)
                    .department
                    .agent_key()
                    .to_string()
            })
            .build()?;

        Ok(Self {
            triage,
            departments,
        })
    }

    /// Triage one customer message and return the routed reply
    pub async fn handle(&self, customer_id: &str, message: &str) -> Result<TriageOutcome> {
        let envelope = user::triage_envelope(customer_id, message)?;
        let mut conversation = vec![ChatMessage::user(envelope)];

        let classified = self.triage.run(conversation.clone()).await?;
        let triage = parse_triage_or_default(&classified.text());
        conversation.extend(classified.messages.iter().cloned());

        let response = self.departments.run(conversation).await?;
        Ok(TriageOutcome {
            triage,
            reply: response.text(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{text_response, ScriptedClient};
    use crate::triage::{Department, Priority};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_fraud_message_routes_to_fraud_desk() {
        let client = Arc::new(ScriptedClient::new(vec![
            text_response(
                r#"{"department": "fraud", "priority": "urgent", "reason": "stolen card"}"#,
            ),
            text_response("We have blocked your card and opened a fraud case."),
        ]));
        let runtime = Runtime::builder().client(client).build().expect("runtime");

        let desk = BankingTriage::new(&runtime).expect("desk");
        let outcome = desk
            .handle("cust-7", "my card was stolen an hour ago")
            .await
            .expect("handle");

        assert_eq!(outcome.triage.department, Department::Fraud);
        assert_eq!(outcome.triage.priority, Priority::Urgent);
        assert_eq!(
            outcome.reply,
            "We have blocked your card and opened a fraud case."
        );
    }

    #[tokio::test]
    async fn test_undecodable_classification_falls_back_to_general() {
        let client = Arc::new(ScriptedClient::new(vec![
            text_response("Sorry, I cannot classify that."),
            text_response("Thanks for reaching out, how can we help?"),
        ]));
        let runtime = Runtime::builder().client(client).build().expect("runtime");

        let desk = BankingTriage::new(&runtime).expect("desk");
        let outcome = desk.handle("cust-8", "hello?").await.expect("handle");

        assert_eq!(outcome.triage, TriageResult::fallback());
        assert_eq!(outcome.reply, "Thanks for reaching out, how can we help?");
    }
}
