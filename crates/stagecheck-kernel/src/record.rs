//! Registry records going in, mismatch rows coming out.

use crate::claims::SourceId;
use crate::status::Status;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One tracked project as the authoritative registry lists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedRecord {
    pub name: String,
    pub expected_status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
}

impl ExpectedRecord {
    pub fn new(name: impl Into<String>, expected_status: Status) -> Self {
        Self {
            name: name.into(),
            expected_status,
            repository_url: None,
        }
    }

    pub fn with_repository_url(mut self, url: impl Into<String>) -> Self {
        self.repository_url = Some(url.into());
        self
    }

    /// The repository URL, if one is set and not blank.
    pub fn repository_url(&self) -> Option<&str> {
        self.repository_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// A project where at least one source disagrees with the registry.
///
/// `observed` has one entry per configured source, in configuration order;
/// `None` means the source made no claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchRow {
    pub name: String,
    pub expected_status: Status,
    pub observed: IndexMap<SourceId, Option<Status>>,
}

impl MismatchRow {
    pub fn observed_for(&self, source: &SourceId) -> Option<&Status> {
        self.observed.get(source).and_then(Option::as_ref)
    }

    /// Sources whose claim disagrees with the expected status.
    pub fn disagreeing_sources(&self) -> impl Iterator<Item = &SourceId> {
        self.observed.iter().filter_map(|(source, observed)| {
            observed
                .as_ref()
                .filter(|status| **status != self.expected_status)
                .map(|_| source)
        })
    }
}
