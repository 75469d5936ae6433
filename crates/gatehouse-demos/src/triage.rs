//! Triage-result parsing
//!
//! The triage agent is instructed to reply with a bare JSON object, but a
//! chat model sometimes wraps it in prose or a code fence. Parsing is one
//! structured decode over the outermost JSON object; anything that fails to
//! decode falls back to a documented default rather than guessing.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Department a customer message is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    /// Card services
    Cards,
    /// Lending
    Loans,
    /// Fraud desk
    Fraud,
    /// General inquiries
    General,
}

impl Department {
    /// Routing key of the department agent
    pub fn agent_key(self) -> &'static str {
        match self {
            Self::Cards => "cards",
            Self::Loans => "loans",
            Self::Fraud => "fraud",
            Self::General => "general",
        }
    }
}

/// Handling priority of a customer message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait
    Low,
    /// Standard queue
    Normal,
    /// Ahead of the standard queue
    High,
    /// Immediate handling
    Urgent,
}

/// Classification of one customer message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageResult {
    /// Target department
    pub department: Department,
    /// Handling priority
    pub priority: Priority,
    /// One-sentence justification from the classifier
    #[serde(default)]
    pub reason: Option<String>,
}

impl TriageResult {
    /// The documented default used when a triage reply cannot be decoded:
    /// general queue, normal priority.
    pub fn fallback() -> Self {
        Self {
            department: Department::General,
            priority: Priority::Normal,
            reason: None,
        }
    }
}

/// A triage reply that could not be decoded
#[derive(Debug, Error)]
pub enum TriageParseError {
    /// The reply contained no JSON object at all
    #[error("triage reply contained no JSON object")]
    NoJson,

    /// The JSON object did not decode into a triage result
    #[error("triage reply failed to decode: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Decode a triage reply
///
/// Tolerates prose or code fences around the object by decoding the
/// outermost `{...}` span.
pub fn parse_triage(reply: &str) -> Result<TriageResult, TriageParseError> {
    let start = reply.find('{').ok_or(TriageParseError::NoJson)?;
    let end = reply.rfind('}').ok_or(TriageParseError::NoJson)?;
    if end < start {
        return Err(TriageParseError::NoJson);
    }

    Ok(serde_json::from_str(&reply[start..=end])?)
}

/// Decode a triage reply, substituting the fallback on failure
pub fn parse_triage_or_default(reply: &str) -> TriageResult {
    parse_triage(reply).unwrap_or_else(|err| {
        warn!("triage reply was not decodable ({err}), using fallback");
        TriageResult::fallback()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_object() {
        let result = parse_triage(r#"{"department": "fraud", "priority": "urgent"}"#)
            .expect("parse");
        assert_eq!(result.department, Department::Fraud);
        assert_eq!(result.priority, Priority::Urgent);
        assert!(result.reason.is_none());
    }

    #[test]
    fn test_parse_fenced_object() {
        let reply = "Here is the classification:\n```json\n{\"department\": \"cards\", \"priority\": \"normal\", \"reason\": \"declined payment\"}\n```";
        let result = parse_triage(reply).expect("parse");
        assert_eq!(result.department, Department::Cards);
        assert_eq!(result.reason.as_deref(), Some("declined payment"));
    }

    #[test]
    fn test_no_json_errors() {
        assert!(matches!(
            parse_triage("I cannot classify this."),
            Err(TriageParseError::NoJson)
        ));
    }

    #[test]
    fn test_bad_department_errors() {
        assert!(matches!(
            parse_triage(r#"{"department": "complaints", "priority": "normal"}"#),
            Err(TriageParseError::Decode(_))
        ));
    }

    #[test]
    fn test_fallback_on_garbage() {
        let result = parse_triage_or_default("total nonsense");
        assert_eq!(result, TriageResult::fallback());
        assert_eq!(result.department, Department::General);
        assert_eq!(result.priority, Priority::Normal);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Urgent > Priority::High);
        assert!(Priority::High > Priority::Normal);
        assert!(Priority::Normal > Priority::Low);
    }
}
