//! Merge request review agent.

use tokio_util::sync::CancellationToken;
use tracing::info;

use super::builtin;
use super::session::AgentSession;
use crate::gitlab::{ReviewContextFetcher, parse_merge_request_url};
use crate::providers::{AgentRequest, ProviderError};
use crate::tools::MergeRequestTool;

/// User message sent to the reviewer for `url`.
pub fn build_review_prompt(url: &str) -> String {
    format!("Review the following GitLab merge request:\n{url}")
}

/// Reviews a merge request by letting the model fetch it through
/// the `get_merge_request_data` tool.
pub struct ReviewAgent {
    fetcher: ReviewContextFetcher,
    max_turns: usize,
}

impl ReviewAgent {
    pub fn new(fetcher: ReviewContextFetcher, max_turns: usize) -> Self {
        Self { fetcher, max_turns }
    }

    /// Run the review and return the model's report.
    ///
    /// A malformed URL is rejected before the model is contacted.
    pub async fn review(
        &self,
        session: &AgentSession,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ProviderError> {
        let url = url.trim();
        let coords = parse_merge_request_url(url)?;
        let provider = session.provider()?;

        let tool = MergeRequestTool::new(self.fetcher.clone(), cancel.clone());
        let request = AgentRequest::new(builtin::reviewer_preamble(), build_review_prompt(url))
            .with_tool(tool, self.max_turns);

        info!(mr = %coords, max_turns = self.max_turns, "starting review");
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ProviderError::Cancelled),
            result = provider.prompt(request) => result,
        }
    }
}
