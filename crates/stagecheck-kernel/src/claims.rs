//! Per-source claim mappings.
//!
//! Every source reduces to the same shape: project key → status, and
//! optionally a [`RepoIndex`] (project key → repository path, repository
//! path → status). Every mapping keeps the first value seen for a key and
//! silently drops later ones; insertion order is document order.

use crate::normalize::normalize_name;
use crate::repo_path::RepoPath;
use crate::status::Status;
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a configured source (e.g. `landscape`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Project key → status, first-seen-wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimMap(IndexMap<String, Status>);

impl ClaimMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a claim for a raw display name.
    ///
    /// The name is normalized; an empty key is ignored. Returns `true` when
    /// the claim was kept, `false` when it was empty or a duplicate.
    pub fn claim(&mut self, raw_name: &str, status: Status) -> bool {
        let key = normalize_name(raw_name);
        self.insert_first(key, status)
    }

    /// Insert under an already-normalized key unless the key is taken.
    pub fn insert_first(&mut self, key: String, status: Status) -> bool {
        if key.is_empty() {
            return false;
        }
        match self.0.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(status);
                true
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Status> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Status)> {
        self.0.iter().map(|(key, status)| (key.as_str(), status))
    }
}

/// Project key → repository path, first-seen-wins. Empty paths are never
/// stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoPathMap(IndexMap<String, RepoPath>);

impl RepoPathMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a repository path for a raw display name. Returns `true` when
    /// kept.
    pub fn record(&mut self, raw_name: &str, path: RepoPath) -> bool {
        let key = normalize_name(raw_name);
        if key.is_empty() || path.is_empty() {
            return false;
        }
        match self.0.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(path);
                true
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&RepoPath> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RepoPath)> {
        self.0.iter().map(|(key, path)| (key.as_str(), path))
    }
}

/// Repository path → status, first-seen-wins per path. Built from each
/// item's own status and link, never by joining on project key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoStatusMap(IndexMap<RepoPath, Status>);

impl RepoStatusMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an item's status under its repository path. Returns `true`
    /// when kept.
    pub fn record(&mut self, path: RepoPath, status: Status) -> bool {
        if path.is_empty() {
            return false;
        }
        match self.0.entry(path) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(status);
                true
            }
        }
    }

    pub fn get(&self, path: &RepoPath) -> Option<&Status> {
        self.0.get(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RepoPath, &Status)> {
        self.0.iter()
    }
}

/// Repository identity published by a source: which path each project key
/// links to, and which status each linked repository carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoIndex {
    pub paths: RepoPathMap,
    pub statuses: RepoStatusMap,
}

impl RepoIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one source item. The name → path entry needs a name; the
    /// path → status entry needs a status. Both need a non-empty path.
    pub fn record_item(&mut self, raw_name: &str, path: RepoPath, status: Option<&Status>) {
        if path.is_empty() {
            return;
        }
        if let Some(status) = status {
            self.statuses.record(path.clone(), status.clone());
        }
        self.paths.record(raw_name, path);
    }
}

/// Everything one source document yields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceClaims {
    pub by_name: ClaimMap,

    /// Present only for sources that publish repository links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repos: Option<RepoIndex>,
}

impl SourceClaims {
    pub fn names_only(by_name: ClaimMap) -> Self {
        Self {
            by_name,
            repos: None,
        }
    }

    pub fn with_repos(by_name: ClaimMap, repos: RepoIndex) -> Self {
        Self {
            by_name,
            repos: Some(repos),
        }
    }
}
