//! Repository identity derived from code-hosting URLs.
//!
//! Display names are not unique across sources, so sources that publish a
//! repository link get a second join key: `org` or `org/repo`, lowercased.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// The only code-hosting domain paths are derived from.
pub const GITHUB_HOST: &str = "github.com";

/// Normalized `org` or `org/repo` path. Empty means "not derivable" and is
/// never a valid identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoPath(String);

impl RepoPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RepoPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derive the repository path from a hosting URL.
///
/// Only `http`/`https` URLs on [`GITHUB_HOST`] (no credentials, no explicit
/// port) resolve. One path segment yields the org; two or more yield
/// `org/repo` with a trailing `.git` stripped from the repo. Anything else,
/// including unparseable input, yields the empty path.
pub fn extract_github_path(url: &str) -> RepoPath {
    let lowered = url.trim().to_lowercase();
    if !(lowered.starts_with("http://") || lowered.starts_with("https://")) {
        return RepoPath::default();
    }
    let Ok(parsed) = Url::parse(&lowered) else {
        return RepoPath::default();
    };
    if parsed.host_str() != Some(GITHUB_HOST)
        || !parsed.username().is_empty()
        || parsed.password().is_some()
        || parsed.port().is_some()
    {
        return RepoPath::default();
    }

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|split| split.filter(|segment| !segment.is_empty()).collect())
        .unwrap_or_default();
    match segments.as_slice() {
        [] => RepoPath::default(),
        [org] => RepoPath(org.to_string()),
        [org, repo, ..] => {
            let repo = repo.strip_suffix(".git").unwrap_or(repo);
            RepoPath(format!("{org}/{repo}"))
        }
    }
}

/// Whether two repository paths plausibly name the same project.
///
/// After trimming and lowercasing: equal paths align, and an org-only path
/// aligns with any `org/repo` inside that org. An empty side never aligns,
/// not even with another empty side.
pub fn paths_align(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }
    org_contains(&a, &b) || org_contains(&b, &a)
}

fn org_contains(org: &str, path: &str) -> bool {
    !org.contains('/')
        && path
            .strip_prefix(org)
            .is_some_and(|rest| rest.starts_with('/'))
}
