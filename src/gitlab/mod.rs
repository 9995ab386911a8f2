//! GitLab merge request acquisition.
//!
//! The pipeline runs leaves first: [`url`] turns a web URL into
//! coordinates, [`client`] resolves the project and fetches the three
//! resources over the v4 REST API, and [`pipeline`] sequences the stages
//! and hands the results to [`crate::context::assemble`].

pub mod client;
pub mod pipeline;
pub mod url;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{DiffEntry, MergeRequestCoordinates, MergeRequestInfo, ProjectId};

pub use client::GitLabClient;
pub use pipeline::ReviewContextFetcher;
pub use url::parse_merge_request_url;

/// Errors from fetching merge request data.
///
/// All variants are terminal; nothing here is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GitLabError {
    #[error("invalid merge request URL: {0}")]
    InvalidUrl(String),

    #[error("project {path} not found: {reason}")]
    ProjectNotFound { path: String, reason: String },

    #[error("unexpected GitLab response while fetching {stage}: {reason}")]
    UpstreamProtocol { stage: &'static str, reason: String },

    #[error("operation cancelled")]
    Cancelled,
}

impl GitLabError {
    pub(crate) fn upstream(stage: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::UpstreamProtocol {
            stage,
            reason: reason.to_string(),
        }
    }
}

/// Read-only view of the GitLab REST API used by the review pipeline.
///
/// [`GitLabClient`] is the HTTP implementation; tests substitute scripted
/// mocks to observe call order.
#[async_trait]
pub trait GitLabApi: Send + Sync {
    /// Look up the numeric ID of `group/project`.
    async fn resolve_project(
        &self,
        coords: &MergeRequestCoordinates,
    ) -> Result<ProjectId, GitLabError>;

    /// Fetch merge request metadata.
    async fn merge_request_info(
        &self,
        project: ProjectId,
        iid: u64,
    ) -> Result<MergeRequestInfo, GitLabError>;

    /// Fetch the per-file changes, in upstream order.
    async fn merge_request_changes(
        &self,
        project: ProjectId,
        iid: u64,
    ) -> Result<Vec<DiffEntry>, GitLabError>;

    /// Fetch the raw `.editorconfig` at `git_ref`. `Ok(None)` when the file does not exist.
    async fn editor_config(
        &self,
        project: ProjectId,
        git_ref: &str,
    ) -> Result<Option<String>, GitLabError>;
}
