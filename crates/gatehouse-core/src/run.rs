//! Agent run output types
//!
//! An agent run produces an ordered, non-replayable sequence of
//! [`AgentRunUpdate`] fragments. The non-streaming view,
//! [`AgentRunResponse`], is defined as the in-order accumulation of that
//! sequence, so both paths always carry identical content.

use crate::message::{ChatMessage, Content, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One incremental unit of an agent's output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRunUpdate {
    /// Identifier of the run this fragment belongs to
    pub response_id: String,

    /// Identifier of the message this fragment contributes to
    pub message_id: String,

    /// Role of the message under construction
    pub role: Role,

    /// Content items carried by this fragment
    pub contents: Vec<Content>,

    /// Fragment creation time
    pub created_at: DateTime<Utc>,

    /// Provider- or host-specific metadata, passed through untouched
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub metadata: Value,
}

impl AgentRunUpdate {
    /// Create a fragment with fresh response and message identifiers
    pub fn new(role: Role, contents: Vec<Content>) -> Self {
        Self {
            response_id: Uuid::new_v4().to_string(),
            message_id: Uuid::new_v4().to_string(),
            role,
            contents,
            created_at: Utc::now(),
            metadata: Value::Null,
        }
    }

    /// Set the run identifier
    pub fn with_response_id(mut self, response_id: impl Into<String>) -> Self {
        self.response_id = response_id.into();
        self
    }

    /// Set the message identifier
    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = message_id.into();
        self
    }

    /// Extract the first text content item (convenience method)
    pub fn text(&self) -> Option<&str> {
        self.contents.iter().find_map(|c| match c {
            Content::Text { text } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// The accumulated result of a complete agent run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRunResponse {
    /// Identifier of the run
    pub response_id: String,

    /// Messages produced by the run, in order
    pub messages: Vec<ChatMessage>,

    /// Completion time
    pub created_at: DateTime<Utc>,
}

impl AgentRunResponse {
    /// Accumulate a fragment sequence into a response
    ///
    /// Consecutive fragments sharing a message id are folded into one
    /// message; fragment order is preserved throughout.
    pub fn from_updates(updates: Vec<AgentRunUpdate>) -> Self {
        let response_id = updates
            .first()
            .map_or_else(|| Uuid::new_v4().to_string(), |u| u.response_id.clone());

        let mut messages: Vec<ChatMessage> = Vec::new();
        let mut current_id: Option<String> = None;

        for update in updates {
            let same_message = current_id.as_deref() == Some(update.message_id.as_str());
            match messages.last_mut() {
                Some(last) if same_message && last.role == update.role => {
                    last.contents.extend(update.contents);
                }
                _ => {
                    current_id = Some(update.message_id.clone());
                    messages.push(ChatMessage::new(update.role, update.contents));
                }
            }
        }

        Self {
            response_id,
            messages,
            created_at: Utc::now(),
        }
    }

    /// Concatenated text of every text item, in order
    pub fn text(&self) -> String {
        let mut out = String::new();
        for message in &self.messages {
            for content in &message.contents {
                if let Content::Text { text } = content {
                    if !out.is_empty() {
                        out.push('\n');
                    }
                    out.push_str(text);
                }
            }
        }
        out
    }

    /// The final message of the run, if any
    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}
