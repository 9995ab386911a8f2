//! HTTP implementation of [`GitLabApi`] over the GitLab REST v4 API.
//!
//! Endpoints used:
//!   * GET /projects/:path
//!   * GET /projects/:id/merge_requests/:iid
//!   * GET /projects/:id/merge_requests/:iid/changes
//!   * GET /projects/:id/repository/files/:path/raw?ref=:ref

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{GitLabApi, GitLabError};
use crate::config::{ConfigError, GitLabSettings};
use crate::constants;
use crate::models::{DiffEntry, MergeRequestCoordinates, MergeRequestInfo, ProjectId};

const STAGE_INFO: &str = "merge request info";
const STAGE_CHANGES: &str = "merge request changes";
const STAGE_CONFIG: &str = "editor config";

/// GitLab HTTP client. The bearer token lives only in the client's default headers.
#[derive(Debug, Clone)]
pub struct GitLabClient {
    http: Client,
    /// e.g. `https://gitlab.example.com/api/v4`
    api_base: String,
}

impl GitLabClient {
    pub fn new(settings: &GitLabSettings) -> Result<Self, ConfigError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", settings.token))
            .map_err(|_| ConfigError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(constants::USER_AGENT)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        let api_base = format!("{}{}", settings.base_url, constants::GITLAB_API_PREFIX);
        debug!(api_base = %api_base, "created GitLab client");

        Ok(Self { http, api_base })
    }

    /// Issue a GET and return the status plus the body text.
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<(StatusCode, String), reqwest::Error> {
        debug!(url, "GitLab GET");
        let resp = self.http.get(url).query(query).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        Ok((status, body))
    }

    /// GET a JSON resource, mapping every failure to an upstream protocol error.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, stage: &'static str) -> Result<T, GitLabError> {
        let (status, body) = self
            .get(url, &[])
            .await
            .map_err(|e| GitLabError::upstream(stage, e))?;
        if !status.is_success() {
            return Err(GitLabError::upstream(stage, format!("HTTP {status}")));
        }
        decode(stage, &body)
    }
}

fn decode<T: DeserializeOwned>(stage: &'static str, body: &str) -> Result<T, GitLabError> {
    serde_json::from_str(body).map_err(|e| GitLabError::upstream(stage, format!("malformed response: {e}")))
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WireAuthor {
    name: String,
}

#[derive(Deserialize)]
struct WireMergeRequest {
    id: u64,
    iid: u64,
    title: String,
    #[serde(default)]
    description: Option<String>,
    author: WireAuthor,
    source_branch: String,
    target_branch: String,
    state: String,
    web_url: String,
}

impl From<WireMergeRequest> for MergeRequestInfo {
    fn from(mr: WireMergeRequest) -> Self {
        Self {
            id: mr.id,
            iid: mr.iid,
            title: mr.title,
            description: mr.description.unwrap_or_default(),
            author: mr.author.name,
            source_branch: mr.source_branch,
            target_branch: mr.target_branch,
            state: mr.state,
            web_url: mr.web_url,
        }
    }
}

#[derive(Deserialize)]
struct WireChange {
    old_path: String,
    new_path: String,
    new_file: bool,
    deleted_file: bool,
    renamed_file: bool,
    diff: String,
}

impl From<WireChange> for DiffEntry {
    fn from(c: WireChange) -> Self {
        Self {
            old_path: c.old_path,
            new_path: c.new_path,
            new_file: c.new_file,
            deleted_file: c.deleted_file,
            renamed_file: c.renamed_file,
            diff: c.diff,
        }
    }
}

#[derive(Deserialize)]
struct WireChanges {
    changes: Vec<WireChange>,
    #[serde(default)]
    overflow: bool,
}

#[async_trait]
impl GitLabApi for GitLabClient {
    async fn resolve_project(
        &self,
        coords: &MergeRequestCoordinates,
    ) -> Result<ProjectId, GitLabError> {
        let path = coords.project_path();
        let url = format!("{}/projects/{}", self.api_base, urlencoding::encode(&path));

        let not_found = |reason: String| GitLabError::ProjectNotFound {
            path: path.clone(),
            reason,
        };
        let (status, body) = self.get(&url, &[]).await.map_err(|e| not_found(e.to_string()))?;
        if !status.is_success() {
            return Err(not_found(format!("HTTP {status}")));
        }

        let value: serde_json::Value = decode("project", &body)?;
        let id = value
            .get("id")
            .and_then(serde_json::Value::as_u64)
            .and_then(ProjectId::new)
            .ok_or_else(|| GitLabError::upstream("project", "response has no positive integer 'id'"))?;

        debug!(project = %path, id = %id, "resolved project");
        Ok(id)
    }

    async fn merge_request_info(
        &self,
        project: ProjectId,
        iid: u64,
    ) -> Result<MergeRequestInfo, GitLabError> {
        let url = format!("{}/projects/{project}/merge_requests/{iid}", self.api_base);
        let mr: WireMergeRequest = self.get_json(&url, STAGE_INFO).await?;
        Ok(mr.into())
    }

    async fn merge_request_changes(
        &self,
        project: ProjectId,
        iid: u64,
    ) -> Result<Vec<DiffEntry>, GitLabError> {
        let url = format!("{}/projects/{project}/merge_requests/{iid}/changes", self.api_base);
        let wire: WireChanges = self.get_json(&url, STAGE_CHANGES).await?;

        if wire.overflow {
            warn!(
                project = %project,
                iid,
                files = wire.changes.len(),
                "GitLab truncated the merge request changes; the review will only see part of the diff"
            );
        }

        Ok(wire.changes.into_iter().map(DiffEntry::from).collect())
    }

    async fn editor_config(
        &self,
        project: ProjectId,
        git_ref: &str,
    ) -> Result<Option<String>, GitLabError> {
        let url = format!(
            "{}/projects/{project}/repository/files/{}/raw",
            self.api_base,
            urlencoding::encode(constants::EDITOR_CONFIG_PATH)
        );
        let (status, body) = self
            .get(&url, &[("ref", git_ref)])
            .await
            .map_err(|e| GitLabError::upstream(STAGE_CONFIG, e))?;

        match status {
            StatusCode::NOT_FOUND => {
                debug!(project = %project, git_ref, "no .editorconfig at target branch");
                Ok(None)
            }
            s if s.is_success() => Ok(Some(body)),
            s => Err(GitLabError::upstream(STAGE_CONFIG, format!("HTTP {s}"))),
        }
    }
}
