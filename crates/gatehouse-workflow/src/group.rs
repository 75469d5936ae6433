//! Round-robin group chat

use gatehouse_core::{AgentRunResponse, ChatAgent, ChatMessage, Error, Result};
use std::sync::Arc;
use tracing::debug;

/// A fixed agent roster taking turns over a shared conversation
///
/// Agents speak in declaration order for a bounded number of rounds. Every
/// reply is appended to the transcript before the next turn. An optional
/// stop predicate can end the chat early after any turn.
pub struct RoundRobin {
    agents: Vec<Arc<dyn ChatAgent>>,
    max_rounds: usize,
    stop: Option<Box<dyn Fn(&AgentRunResponse) -> bool + Send + Sync>>,
}

impl RoundRobin {
    /// Create a new builder
    pub fn builder() -> RoundRobinBuilder {
        RoundRobinBuilder::new()
    }

    /// Run the group chat and return the full transcript
    pub async fn execute(&self, messages: Vec<ChatMessage>) -> Result<Vec<ChatMessage>> {
        let mut transcript = messages;

        'rounds: for round in 1..=self.max_rounds {
            debug!(round, "starting group chat round");

            for agent in &self.agents {
                let response = agent.run(transcript.clone()).await?;
                transcript.extend(response.messages.iter().cloned());

                if let Some(stop) = &self.stop {
                    if stop(&response) {
                        debug!(round, speaker = %agent.name(), "stop predicate ended the chat");
                        break 'rounds;
                    }
                }
            }
        }

        Ok(transcript)
    }

    /// Number of agents in the roster
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Check whether the roster is empty
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// Builder for RoundRobin
pub struct RoundRobinBuilder {
    agents: Vec<Arc<dyn ChatAgent>>,
    max_rounds: usize,
    stop: Option<Box<dyn Fn(&AgentRunResponse) -> bool + Send + Sync>>,
}

impl RoundRobinBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            agents: Vec::new(),
            max_rounds: 1,
            stop: None,
        }
    }

    /// Add an agent to the roster
    pub fn add_agent(mut self, agent: Arc<dyn ChatAgent>) -> Self {
        self.agents.push(agent);
        self
    }

    /// Set the maximum number of rounds
    pub fn max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Set the stop predicate
    ///
    /// Checked after every turn; returning true ends the chat.
    pub fn stop_when<F>(mut self, stop: F) -> Self
    where
        F: Fn(&AgentRunResponse) -> bool + Send + Sync + 'static,
    {
        self.stop = Some(Box::new(stop));
        self
    }

    /// Build the group chat
    ///
    /// # Errors
    ///
    /// Returns an error if the roster is empty.
    pub fn build(self) -> Result<RoundRobin> {
        if self.agents.is_empty() {
            return Err(Error::InitializationFailed(
                "No agents added to group chat".to_string(),
            ));
        }
        Ok(RoundRobin {
            agents: self.agents,
            max_rounds: self.max_rounds,
            stop: self.stop,
        })
    }
}

impl Default for RoundRobinBuilder {
    fn default() -> Self {
        Self::new()
    }
}
