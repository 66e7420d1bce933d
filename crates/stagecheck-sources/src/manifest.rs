//! The authoritative registry manifest.
//!
//! Two layouts are accepted:
//!
//! ```text
//! categorized                         flat export
//! categories:                         projects:
//!   Graduated: [{name, repository_url}]   - {name, category, status, repository_url}
//!   Incubating: [...]
//! archived_projects: [...]
//! forming_projects: [...]
//! ```
//!
//! The flat layout is grouped into the categorized one: a status of
//! archived or forming wins over the category.

use crate::error::SourceError;
use crate::lenient::{LenientList, first_non_blank, scalar_text};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use stagecheck_kernel::{ExpectedRecord, Status, normalize_status};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestItem {
    #[serde(default, deserialize_with = "scalar_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub repository_url: Option<String>,
}

impl ManifestItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            repository_url: None,
        }
    }

    pub fn with_repository_url(mut self, url: impl Into<String>) -> Self {
        self.repository_url = Some(url.into());
        self
    }

    fn expected(&self, status: &Status) -> Option<ExpectedRecord> {
        let name = first_non_blank([self.name.as_deref()])?;
        let mut record = ExpectedRecord::new(name, status.clone());
        if let Some(url) = first_non_blank([self.repository_url.as_deref()]) {
            record = record.with_repository_url(url);
        }
        Some(record)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub categories: IndexMap<String, LenientList<ManifestItem>>,
    #[serde(default)]
    pub archived_projects: LenientList<ManifestItem>,
    #[serde(default)]
    pub forming_projects: LenientList<ManifestItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct FlatExport {
    #[serde(default)]
    projects: LenientList<FlatProject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct FlatProject {
    #[serde(default, deserialize_with = "scalar_text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    category: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    status: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    repository_url: Option<String>,
}

impl Manifest {
    /// Parse either manifest layout from YAML.
    pub fn from_yaml_str(text: &str, origin: &str) -> Result<Self, SourceError> {
        let value: Value =
            serde_yaml::from_str(text).map_err(|err| SourceError::yaml(origin, err))?;
        let Value::Mapping(top) = &value else {
            return Err(SourceError::shape(origin, "top-level mapping required"));
        };

        let categorized = ["categories", "archived_projects", "forming_projects"]
            .iter()
            .any(|key| top.contains_key(*key));
        if categorized {
            return serde_yaml::from_value(value).map_err(|err| SourceError::yaml(origin, err));
        }
        if top.contains_key("projects") {
            let export: FlatExport =
                serde_yaml::from_value(value).map_err(|err| SourceError::yaml(origin, err))?;
            return Ok(Self::from_flat(export.projects.into_inner()));
        }
        Err(SourceError::shape(
            origin,
            "expected `categories`/`archived_projects`/`forming_projects` or `projects`",
        ))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SourceError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&text, &path.display().to_string())
    }

    fn from_flat(projects: Vec<FlatProject>) -> Self {
        let mut manifest = Self::default();
        for project in projects {
            let item = ManifestItem {
                name: project.name,
                repository_url: project.repository_url,
            };
            match project.status.as_deref().and_then(normalize_status) {
                Some(Status::Archived) => manifest.archived_projects.push(item),
                Some(Status::Forming) => manifest.forming_projects.push(item),
                _ => {
                    let Some(category) = first_non_blank([project.category.as_deref()]) else {
                        debug!(project = ?item.name, "skipping export record without a category");
                        continue;
                    };
                    manifest
                        .categories
                        .entry(category.to_string())
                        .or_default()
                        .push(item);
                }
            }
        }
        manifest
    }

    /// Registry records in manifest order: graduated/incubating/sandbox
    /// category lists as listed (other categories are ignored), then
    /// archived, then forming. Items without a name are skipped.
    pub fn expected_records(&self) -> Vec<ExpectedRecord> {
        let mut records = Vec::new();
        for (category, items) in &self.categories {
            let Some(status) = normalize_status(category).filter(Status::is_category_stage) else {
                debug!(category = %category, "ignoring non-stage category");
                continue;
            };
            records.extend(items.iter().filter_map(|item| item.expected(&status)));
        }
        records.extend(
            self.archived_projects
                .iter()
                .filter_map(|item| item.expected(&Status::Archived)),
        );
        records.extend(
            self.forming_projects
                .iter()
                .filter_map(|item| item.expected(&Status::Forming)),
        );
        records
    }
}
