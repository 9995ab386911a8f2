//! Review context acquisition pipeline.
//!
//! URL → project ID → (info ∥ changes) → editor config → [`ReviewContext`].
//! Every stage is raced against a [`CancellationToken`]; once cancelled no
//! further requests are issued.

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{GitLabApi, GitLabError, parse_merge_request_url};
use crate::context;
use crate::models::ReviewContext;

/// Fetches everything needed to review one merge request.
#[derive(Clone)]
pub struct ReviewContextFetcher {
    api: Arc<dyn GitLabApi>,
}

impl ReviewContextFetcher {
    pub fn new(api: Arc<dyn GitLabApi>) -> Self {
        Self { api }
    }

    /// Run the full pipeline for a merge request web URL.
    ///
    /// The project ID is resolved once and shared by all fetchers. Merge
    /// request info and changes are fetched concurrently; the editor
    /// config is fetched afterwards at the target branch. Any failure
    /// aborts the remaining stages.
    pub async fn fetch(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<ReviewContext, GitLabError> {
        let coords = parse_merge_request_url(url)?;
        debug!(mr = %coords, "parsed merge request URL");

        let project = guard(cancel, self.api.resolve_project(&coords)).await?;

        let (info, diffs) = guard(cancel, async {
            tokio::try_join!(
                self.api.merge_request_info(project, coords.iid),
                self.api.merge_request_changes(project, coords.iid),
            )
        })
        .await?;

        let editor_config =
            guard(cancel, self.api.editor_config(project, &info.target_branch)).await?;

        info!(
            mr = %coords,
            project = %project,
            files = diffs.len(),
            editor_config = editor_config.is_some(),
            "fetched merge request context"
        );

        Ok(context::assemble(info, diffs, editor_config))
    }
}

/// Race one stage against cancellation, checking the token first.
async fn guard<T, F>(cancel: &CancellationToken, stage: F) -> Result<T, GitLabError>
where
    F: Future<Output = Result<T, GitLabError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(GitLabError::Cancelled),
        result = stage => result,
    }
}
