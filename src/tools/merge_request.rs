//! MergeRequestTool: fetches a merge request for review.
//!
//! Implements rig-core's `Tool` trait for native agentic tool calling.

use std::time::Instant;

use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::Deserialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::context::render_tool_payload;
use crate::gitlab::{GitLabError, ReviewContextFetcher};

/// Arguments for the get_merge_request_data tool.
#[derive(Debug, Deserialize)]
pub struct MergeRequestArgs {
    /// Web URL of the merge request.
    pub url: String,
}

/// Error type for the get_merge_request_data tool.
#[derive(Debug, thiserror::Error)]
#[error("get_merge_request_data error: {0}")]
pub struct MergeRequestToolError(#[from] pub GitLabError);

/// Rig-core tool that runs the acquisition pipeline for a merge request URL.
///
/// Only issues HTTP reads, so the model may call it any number of times.
#[derive(Clone)]
pub struct MergeRequestTool {
    fetcher: ReviewContextFetcher,
    cancel: CancellationToken,
}

impl MergeRequestTool {
    pub fn new(fetcher: ReviewContextFetcher, cancel: CancellationToken) -> Self {
        Self { fetcher, cancel }
    }

    /// Fetch and render the merge request behind `url`.
    pub async fn fetch(&self, url: &str) -> Result<String, MergeRequestToolError> {
        let started = Instant::now();
        let result = self.fetcher.fetch(url, &self.cancel).await;
        match &result {
            Ok(ctx) => info!(
                tool = Self::NAME,
                files = ctx.diffs.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "tool call finished"
            ),
            Err(e) => warn!(tool = Self::NAME, error = %e, "tool call failed"),
        }
        Ok(render_tool_payload(&result?))
    }
}

impl Tool for MergeRequestTool {
    const NAME: &'static str = "get_merge_request_data";
    type Error = MergeRequestToolError;
    type Args = MergeRequestArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Fetch a GitLab merge request by its web URL. Returns the title, \
                description, author, source and target branches, the unified diff of every \
                changed file, and the repository's .editorconfig at the target branch \
                (or a note that it is absent)."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "Merge request URL, e.g. 'https://gitlab.example.com/group/project/-/merge_requests/42'"
                    }
                },
                "required": ["url"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        self.fetch(&args.url).await
    }
}
