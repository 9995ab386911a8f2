//! Merge request URL parsing.

use std::sync::LazyLock;

use regex::Regex;

use super::GitLabError;
use crate::models::MergeRequestCoordinates;

/// `scheme://host/<anything>/<group>/<project>/-/merge_requests/<iid>` followed by
/// end of input, `/`, `?` or `#`. The namespace prefix never crosses into the
/// query or fragment.
static MR_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z][A-Za-z0-9+.\-]*://[^/\s?#]+/(?:[^\s?#]*/)?(?P<group>[^/\s?#]+)/(?P<project>[^/\s?#]+)/-/merge_requests/(?P<iid>\d+)(?:[/?#]|$)",
    )
    .unwrap()
});

/// Parse a GitLab merge request web URL into API coordinates.
///
/// Only the two segments right before `-/merge_requests/` are kept; any
/// parent namespaces are ignored. Never performs I/O.
pub fn parse_merge_request_url(url: &str) -> Result<MergeRequestCoordinates, GitLabError> {
    let trimmed = url.trim();
    let caps = MR_URL_RE.captures(trimmed).ok_or_else(|| {
        GitLabError::InvalidUrl(format!(
            "'{trimmed}' does not look like <host>/<group>/<project>/-/merge_requests/<iid>"
        ))
    })?;

    let iid: u64 = caps["iid"]
        .parse()
        .map_err(|_| GitLabError::InvalidUrl(format!("merge request IID out of range in '{trimmed}'")))?;
    if iid == 0 {
        return Err(GitLabError::InvalidUrl(format!(
            "merge request IID must be positive in '{trimmed}'"
        )));
    }

    Ok(MergeRequestCoordinates {
        group: caps["group"].to_string(),
        project: caps["project"].to_string(),
        iid,
    })
}
