//! Per-customer conversation state
//!
//! An explicit keyed store: customer id → append-only message log. The lock
//! is held only for the duration of one append or one snapshot, so
//! concurrent requests for different customers never contend on each other's
//! history.

use gatehouse_core::ChatMessage;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::warn;

/// Keyed store of customer conversation logs
pub struct ConversationStore {
    logs: RwLock<HashMap<String, Vec<ChatMessage>>>,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self {
            logs: RwLock::new(HashMap::new()),
        }
    }
}

impl ConversationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one message to a customer's log
    pub fn append(&self, customer_id: &str, message: ChatMessage) {
        self.extend(customer_id, vec![message]);
    }

    /// Append several messages to a customer's log
    pub fn extend(&self, customer_id: &str, messages: Vec<ChatMessage>) {
        match self.logs.write() {
            Ok(mut logs) => logs
                .entry(customer_id.to_string())
                .or_default()
                .extend(messages),
            Err(_) => warn!("conversation store lock poisoned, dropping messages"),
        }
    }

    /// Snapshot a customer's full history, oldest first
    pub fn history(&self, customer_id: &str) -> Vec<ChatMessage> {
        self.logs
            .read()
            .ok()
            .and_then(|logs| logs.get(customer_id).cloned())
            .unwrap_or_default()
    }

    /// Drop a customer's history
    pub fn clear(&self, customer_id: &str) -> bool {
        self.logs
            .write()
            .ok()
            .and_then(|mut logs| logs.remove(customer_id))
            .is_some()
    }

    /// Number of customers with stored history
    pub fn len(&self) -> usize {
        self.logs.read().map(|logs| logs.len()).unwrap_or(0)
    }

    /// Check whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_history() {
        let store = ConversationStore::new();
        assert!(store.is_empty());

        store.append("cust-1", ChatMessage::user("first"));
        store.append("cust-1", ChatMessage::assistant("reply"));
        store.append("cust-2", ChatMessage::user("other customer"));

        let history = store.history("cust-1");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].text(), Some("first"));
        assert_eq!(history[1].text(), Some("reply"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_histories_are_isolated() {
        let store = ConversationStore::new();
        store.append("cust-1", ChatMessage::user("mine"));

        assert!(store.history("cust-2").is_empty());
    }

    #[test]
    fn test_clear() {
        let store = ConversationStore::new();
        store.append("cust-1", ChatMessage::user("hello"));

        assert!(store.clear("cust-1"));
        assert!(!store.clear("cust-1"));
        assert!(store.history("cust-1").is_empty());
    }
}
