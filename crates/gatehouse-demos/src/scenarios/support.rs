//! Customer support scenario
//!
//! A multi-turn support chat. The per-customer history lives in an explicit
//! [`ConversationStore`], so every turn sees the full prior conversation and
//! different customers never share state.

use crate::conversation::ConversationStore;
use crate::error::Result;
use crate::prompts::system;
use gatehouse_core::{ChatAgent, ChatMessage};
use gatehouse_runtime::{ChatClientAgent, Runtime};

/// Multi-turn support desk with per-customer history
pub struct SupportDesk {
    agent: ChatClientAgent,
    store: ConversationStore,
}

impl SupportDesk {
    /// Build the support agent from the runtime
    pub fn new(runtime: &Runtime) -> Self {
        Self {
            agent: runtime.create_agent("support-agent", system::SUPPORT_AGENT),
            store: ConversationStore::new(),
        }
    }

    /// Handle one customer message and return the reply
    pub async fn handle(&self, customer_id: &str, message: &str) -> Result<String> {
        self.store.append(customer_id, ChatMessage::user(message));

        let history = self.store.history(customer_id);
        let response = self.agent.run(history).await?;

        self.store.extend(customer_id, response.messages.clone());
        Ok(response.text())
    }

    /// Snapshot a customer's conversation so far
    pub fn history(&self, customer_id: &str) -> Vec<ChatMessage> {
        self.store.history(customer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{text_response, ScriptedClient};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_history_accumulates_across_turns() {
        let client = Arc::new(ScriptedClient::new(vec![
            text_response("You can reset it in the app under Settings."),
            text_response("Yes, the same steps work for the joint account."),
        ]));
        let runtime = Runtime::builder().client(client).build().expect("runtime");

        let desk = SupportDesk::new(&runtime);
        desk.handle("cust-1", "how do I reset my PIN?")
            .await
            .expect("first turn");
        desk.handle("cust-1", "does that work for the joint account too?")
            .await
            .expect("second turn");

        let history = desk.history("cust-1");
        // two user messages and two assistant replies
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].text(), Some("how do I reset my PIN?"));
        assert_eq!(
            history[3].text(),
            Some("Yes, the same steps work for the joint account.")
        );
    }

    #[tokio::test]
    async fn test_customers_do_not_share_history() {
        let client = Arc::new(ScriptedClient::new(vec![
            text_response("reply one"),
            text_response("reply two"),
        ]));
        let runtime = Runtime::builder().client(client).build().expect("runtime");

        let desk = SupportDesk::new(&runtime);
        desk.handle("cust-1", "first question").await.expect("turn");
        desk.handle("cust-2", "other question").await.expect("turn");

        assert_eq!(desk.history("cust-1").len(), 2);
        assert_eq!(desk.history("cust-2").len(), 2);
    }
}
