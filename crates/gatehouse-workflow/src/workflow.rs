//! Sequential workflow definition and execution

use gatehouse_core::{AgentRunResponse, ChatAgent, ChatMessage, Error, Result};
use std::sync::Arc;
use tracing::debug;

/// A step in a workflow
#[derive(Clone)]
pub enum WorkflowStep {
    /// Execute a single agent
    Agent(Arc<dyn ChatAgent>),
    /// Execute a sub-workflow
    SubWorkflow(Arc<Workflow>),
}

/// A workflow that coordinates multiple agents
///
/// Workflows execute agents sequentially over a shared conversation: each
/// step sees everything produced before it, and its own messages are
/// appended before the next step runs. Workflows support nesting, allowing
/// hierarchical structures.
///
/// # Example
///
/// ```no_run
/// use gatehouse_workflow::Workflow;
/// use gatehouse_core::ChatMessage;
/// use std::sync::Arc;
///
/// # async fn example(
/// #     intake: Arc<dyn gatehouse_core::ChatAgent>,
/// #     assessor: Arc<dyn gatehouse_core::ChatAgent>,
/// # ) -> gatehouse_core::Result<()> {
/// let workflow = Workflow::builder()
///     .add_agent(intake)
///     .add_agent(assessor)
///     .build()?;
///
/// let result = workflow.execute(vec![ChatMessage::user("New application")]).await?;
/// # Ok(())
/// # }
/// ```
pub struct Workflow {
    steps: Vec<WorkflowStep>,
}

impl Workflow {
    /// Create a new workflow builder
    pub fn builder() -> WorkflowBuilder {
        WorkflowBuilder::new()
    }

    /// Execute the workflow
    ///
    /// # Arguments
    ///
    /// * `messages` - The initial conversation to process
    ///
    /// # Returns
    ///
    /// The final step's response after all steps have been executed
    pub fn execute(
        &self,
        messages: Vec<ChatMessage>,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<AgentRunResponse>> + Send + '_>>
    {
        Box::pin(async move {
            let mut conversation = messages;
            let mut last_response: Option<AgentRunResponse> = None;

            // Sequential execution through all steps
            for step in &self.steps {
                let response = match step {
                    WorkflowStep::Agent(agent) => {
                        debug!(step = %agent.name(), "running workflow step");
                        agent.run(conversation.clone()).await?
                    }
                    WorkflowStep::SubWorkflow(workflow) => {
                        workflow.execute(conversation.clone()).await?
                    }
                };

                conversation.extend(response.messages.iter().cloned());
                last_response = Some(response);
            }

            last_response.ok_or_else(|| Error::RunFailed("Workflow has no steps".to_string()))
        })
    }

    /// Number of steps in this workflow
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check whether the workflow has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Builder for constructing workflows
pub struct WorkflowBuilder {
    steps: Vec<WorkflowStep>,
}

impl WorkflowBuilder {
    /// Create a new workflow builder
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Add an agent to the workflow
    pub fn add_agent(mut self, agent: Arc<dyn ChatAgent>) -> Self {
        self.steps.push(WorkflowStep::Agent(agent));
        self
    }

    /// Add a sub-workflow to the workflow
    ///
    /// This allows for nested workflow structures.
    pub fn add_workflow(mut self, workflow: Workflow) -> Self {
        self.steps.push(WorkflowStep::SubWorkflow(Arc::new(workflow)));
        self
    }

    /// Build the workflow
    pub fn build(self) -> Result<Workflow> {
        Ok(Workflow { steps: self.steps })
    }
}

impl Default for WorkflowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::{stream, StreamExt};
    use gatehouse_core::{AgentRunStream, AgentRunUpdate, Content, Role};

    /// Agent that replies with its name and how many messages it saw
    struct CountingAgent(&'static str);

    #[async_trait]
    impl ChatAgent for CountingAgent {
        fn name(&self) -> &str {
            self.0
        }

        async fn run_stream(&self, messages: Vec<ChatMessage>) -> Result<AgentRunStream> {
            let update = AgentRunUpdate::new(
                Role::Assistant,
                vec![Content::text(format!("{}:{}", self.0, messages.len()))],
            );
            Ok(stream::iter(vec![Ok(update)]).boxed())
        }
    }

    #[tokio::test]
    async fn test_sequential_conversation_growth() {
        let workflow = Workflow::builder()
            .add_agent(Arc::new(CountingAgent("first")))
            .add_agent(Arc::new(CountingAgent("second")))
            .build()
            .expect("build");

        let response = workflow
            .execute(vec![ChatMessage::user("start")])
            .await
            .expect("execute");

        // the second step saw the original message plus the first reply
        assert_eq!(response.text(), "second:2");
    }

    #[tokio::test]
    async fn test_nested_workflow() {
        let inner = Workflow::builder()
            .add_agent(Arc::new(CountingAgent("inner")))
            .build()
            .expect("build inner");

        let outer = Workflow::builder()
            .add_workflow(inner)
            .add_agent(Arc::new(CountingAgent("outer")))
            .build()
            .expect("build outer");

        let response = outer
            .execute(vec![ChatMessage::user("start")])
            .await
            .expect("execute");
        assert_eq!(response.text(), "outer:2");
    }

    #[tokio::test]
    async fn test_empty_workflow_fails() {
        let workflow = Workflow::builder().build().expect("build");
        assert!(workflow.is_empty());
        let err = workflow
            .execute(vec![ChatMessage::user("start")])
            .await
            .expect_err("must fail");
        assert!(matches!(err, Error::RunFailed(_)));
    }
}
