//! Error types for the approval protocol

use thiserror::Error;

/// A message item claiming to take part in the approval protocol was not
/// well-formed
///
/// Protocol errors are never retried: inbound they abort the turn before it
/// reaches the agent, outbound they terminate the stream.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// A `request_approval` call carried no `request` argument
    #[error("approval call '{call_id}' is missing its 'request' argument")]
    MissingRequest {
        /// Correlation id of the offending call
        call_id: String,
    },

    /// The `request` argument did not decode into an approval request
    #[error("approval call '{call_id}' carried a malformed request: {source}")]
    MalformedRequest {
        /// Correlation id of the offending call
        call_id: String,
        /// Decode failure
        source: serde_json::Error,
    },

    /// A tracked approval's result payload did not decode into a decision
    #[error("approval result '{call_id}' carried a malformed decision: {source}")]
    MalformedDecision {
        /// Correlation id of the offending result
        call_id: String,
        /// Decode failure
        source: serde_json::Error,
    },
}

impl From<ProtocolError> for gatehouse_core::Error {
    fn from(err: ProtocolError) -> Self {
        gatehouse_core::Error::Protocol(err.to_string())
    }
}
