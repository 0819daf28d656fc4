//! Core traits for the agent pipeline.
//!
//! Every stage of learning-path generation is an `Agent`: one async
//! operation from a typed request to a typed output.
//!
//! ## Design Note
//! - `process` is infallible by signature. A fault inside an agent, or in
//!   any collaborator it calls, comes back as `AgentOutput::error()` next to
//!   safe default data. The orchestrator never has to unwind.
//! - `Send + Sync` lets one agent instance serve concurrent requests; agents
//!   hold no per-request state.

use async_trait::async_trait;

/// A stateless unit of pipeline work.
#[async_trait]
pub trait Agent: Send + Sync {
    type Input: Send + 'static;
    type Output: AgentOutput + Send + 'static;

    /// Returns the name of this agent (for logging/debugging)
    fn name(&self) -> &str;

    /// Run the agent once. Never fails; see [`AgentOutput::error`].
    async fn process(&self, input: Self::Input) -> Self::Output;
}

/// Output of an agent: usable data, possibly with an error marker.
pub trait AgentOutput {
    /// The error message, if the agent had to fall back to default data
    fn error(&self) -> Option<&str>;

    fn is_ok(&self) -> bool {
        self.error().is_none()
    }
}
