//! Tools used by the operations scenario

use async_trait::async_trait;
use gatehouse_core::Result;
use gatehouse_tools::{schema, Tool};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Read-only account lookup over a small in-memory directory
pub struct AccountDirectoryTool;

#[async_trait]
impl Tool for AccountDirectoryTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let account_id = params
            .get("account_id")
            .and_then(Value::as_str)
            .unwrap_or_default();

        // A fixed directory is all the walkthrough needs.
        let record = match account_id {
            "acct-1001" => json!({
                "account_id": "acct-1001",
                "holder": "M. Rivera",
                "status": "active",
                "recent_flags": ["3 failed login attempts", "new payee added"],
            }),
            "acct-1002" => json!({
                "account_id": "acct-1002",
                "holder": "J. Okafor",
                "status": "active",
                "recent_flags": [],
            }),
            _ => json!({"error": format!("unknown account: {account_id}")}),
        };

        Ok(record)
    }

    fn name(&self) -> &str {
        "lookup_account"
    }

    fn description(&self) -> &str {
        "Look up an account's holder, status, and recent security flags"
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "account_id": schema::string("Account identifier, e.g. acct-1001"),
            }),
            vec!["account_id"],
        )
    }
}

/// Account freeze - a side-effecting operation gated behind human approval
pub struct FreezeAccountTool {
    frozen: Arc<Mutex<HashSet<String>>>,
}

impl FreezeAccountTool {
    /// Create the tool with an empty frozen set
    pub fn new() -> Self {
        Self {
            frozen: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Check whether an account has been frozen by this tool
    pub fn is_frozen(&self, account_id: &str) -> bool {
        self.frozen
            .lock()
            .map(|frozen| frozen.contains(account_id))
            .unwrap_or(false)
    }

    /// Shared handle to the frozen set, for assertions in callers
    pub fn frozen_handle(&self) -> Arc<Mutex<HashSet<String>>> {
        self.frozen.clone()
    }
}

impl Default for FreezeAccountTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for FreezeAccountTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let account_id = params
            .get("account_id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        info!(account = %account_id, "freezing account");
        if let Ok(mut frozen) = self.frozen.lock() {
            frozen.insert(account_id.clone());
        }

        Ok(json!({"account_id": account_id, "status": "frozen"}))
    }

    fn name(&self) -> &str {
        "freeze_account"
    }

    fn description(&self) -> &str {
        "Freeze an account so no further transactions can clear"
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "account_id": schema::string("Account identifier to freeze"),
                "reason": schema::string("Why the freeze is warranted"),
            }),
            vec!["account_id"],
        )
    }

    fn requires_approval(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_known_account() {
        let tool = AccountDirectoryTool;
        let record = tool
            .execute(json!({"account_id": "acct-1001"}))
            .await
            .expect("execute");
        assert_eq!(record["holder"], "M. Rivera");
    }

    #[tokio::test]
    async fn test_lookup_unknown_account() {
        let tool = AccountDirectoryTool;
        let record = tool
            .execute(json!({"account_id": "acct-9999"}))
            .await
            .expect("execute");
        assert!(record["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_freeze_records_account() {
        let tool = FreezeAccountTool::new();
        assert!(tool.requires_approval());
        assert!(!tool.is_frozen("acct-1001"));

        tool.execute(json!({"account_id": "acct-1001", "reason": "fraud"}))
            .await
            .expect("execute");
        assert!(tool.is_frozen("acct-1001"));
    }
}
