//! AgentProvider trait and LLM integration.
//!
//! Provides an abstraction layer over rig-core to decouple the
//! agents from the specific LLM library.

pub mod rig;

use async_trait::async_trait;
use thiserror::Error;

use crate::gitlab::GitLabError;
use crate::tools::MergeRequestTool;

/// Errors from the agent provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("LLM API error: {0}")]
    ApiError(String),

    #[error("provider not configured: {0}")]
    NotConfigured(String),

    #[error("agent session has not been started")]
    NotStarted,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error(transparent)]
    GitLab(#[from] GitLabError),
}

/// One prompt sent to the model.
pub struct AgentRequest {
    /// System instructions.
    pub preamble: String,
    /// User message.
    pub prompt: String,
    /// Merge request tool the model may call, if any.
    pub tool: Option<MergeRequestTool>,
    /// Turn budget for the tool-calling loop. Ignored without a tool.
    pub max_turns: usize,
}

impl AgentRequest {
    /// A plain prompt with no tools.
    pub fn new(preamble: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            preamble: preamble.into(),
            prompt: prompt.into(),
            tool: None,
            max_turns: 1,
        }
    }

    /// Register the merge request tool with the given turn budget.
    pub fn with_tool(mut self, tool: MergeRequestTool, max_turns: usize) -> Self {
        self.tool = Some(tool);
        self.max_turns = max_turns.max(1);
        self
    }
}

/// Trait for LLM-backed text generation.
///
/// Implementations handle client construction and the tool-calling loop.
#[async_trait]
pub trait AgentProvider: Send + Sync {
    /// Run the request to completion and return the model's final text.
    async fn prompt(&self, request: AgentRequest) -> Result<String, ProviderError>;
}
