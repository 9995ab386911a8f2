//! Merge request data model.
//!
//! Everything the review pipeline produces is immutable once built: the
//! coordinates come out of the URL parser, the rest out of the GitLab
//! fetchers, and [`ReviewContext`] is only ever constructed whole.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable API coordinates of a merge request, parsed from its web URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergeRequestCoordinates {
    /// Namespace segment immediately preceding the project.
    pub group: String,
    /// Project path segment.
    pub project: String,
    /// Project-scoped merge request number. Always `> 0`.
    pub iid: u64,
}

impl MergeRequestCoordinates {
    /// The `group/project` path GitLab accepts (URL-encoded) in place of a numeric ID.
    pub fn project_path(&self) -> String {
        format!("{}/{}", self.group, self.project)
    }
}

impl fmt::Display for MergeRequestCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}!{}", self.group, self.project, self.iid)
    }
}

/// Numeric GitLab project identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(u64);

impl ProjectId {
    /// Wrap a raw ID. Returns `None` for `0`, which GitLab never assigns.
    pub fn new(raw: u64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Merge request metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequestInfo {
    pub id: u64,
    pub iid: u64,
    pub title: String,
    /// Empty when GitLab has no description for the merge request.
    pub description: String,
    /// Display name of the author.
    pub author: String,
    pub source_branch: String,
    pub target_branch: String,
    pub state: String,
    pub web_url: String,
}

/// One changed file of a merge request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub old_path: String,
    pub new_path: String,
    pub new_file: bool,
    pub deleted_file: bool,
    pub renamed_file: bool,
    /// Unified diff text of the changed hunks.
    pub diff: String,
}

impl DiffEntry {
    /// Path to report the change under: the new path unless the file was deleted.
    pub fn path(&self) -> &str {
        if self.deleted_file {
            &self.old_path
        } else {
            &self.new_path
        }
    }
}

/// Everything the reviewing agent receives about one merge request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewContext {
    pub info: MergeRequestInfo,
    /// File changes in the order GitLab returned them.
    pub diffs: Vec<DiffEntry>,
    /// Raw `.editorconfig` content at the target branch, `None` when the file does not exist.
    pub editor_config: Option<String>,
}
