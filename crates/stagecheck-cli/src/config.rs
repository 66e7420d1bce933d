//! Audit configuration (`stagecheck.toml`).

use serde::Deserialize;
use stagecheck_sources::SourceKind;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("{path}: at least one [[sources]] entry is required")]
    NoSources { path: String },

    #[error("{path}: source #{index} has an empty id")]
    EmptySourceId { path: String, index: usize },

    #[error("{path}: duplicate source id `{id}`")]
    DuplicateSourceId { path: String, id: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    #[serde(default)]
    pub title: Option<String>,
    pub manifest: PathBuf,
    /// Link target for the registry column; defaults to the manifest path.
    #[serde(default)]
    pub manifest_url: Option<String>,
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    pub kind: SourceKind,
    pub path: PathBuf,
    #[serde(default)]
    pub url: Option<String>,
}

impl SourceConfig {
    /// Column label; the id when no label is configured.
    pub fn column_label(&self) -> &str {
        self.label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or(self.id.as_str())
    }
}

impl AuditConfig {
    /// Read, validate and anchor a config file. Relative paths inside it are
    /// resolved against the file's own directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::parse(&text, &path.display().to_string(), base)
    }

    pub fn parse(text: &str, origin: &str, base: &Path) -> Result<Self, ConfigError> {
        let mut config: AuditConfig =
            toml::from_str(text).map_err(|source| ConfigError::ParseToml {
                path: origin.to_string(),
                source,
            })?;
        config.validate(origin)?;
        config.manifest = anchor(base, &config.manifest);
        for source in &mut config.sources {
            source.id = source.id.trim().to_string();
            source.path = anchor(base, &source.path);
        }
        Ok(config)
    }

    fn validate(&self, origin: &str) -> Result<(), ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::NoSources {
                path: origin.to_string(),
            });
        }
        let mut seen = BTreeSet::new();
        for (index, source) in self.sources.iter().enumerate() {
            let id = source.id.trim();
            if id.is_empty() {
                return Err(ConfigError::EmptySourceId {
                    path: origin.to_string(),
                    index: index + 1,
                });
            }
            if !seen.insert(id) {
                return Err(ConfigError::DuplicateSourceId {
                    path: origin.to_string(),
                    id: id.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn anchor(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
