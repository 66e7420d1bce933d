//! Document-level failures. Record-level defects never reach here: the
//! offending record is skipped and extraction continues.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read file: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid yaml in {origin}: {source}")]
    ParseYaml {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid csv in {origin}: {source}")]
    ParseCsv {
        origin: String,
        #[source]
        source: csv::Error,
    },

    #[error("unexpected document shape in {origin}: {detail}")]
    Shape { origin: String, detail: String },

    #[error("unknown source kind {0:?} (expected tree, tabular, record_list, heading_grouped, or indent_grouped)")]
    UnknownKind(String),
}

impl SourceError {
    pub(crate) fn yaml(origin: &str, source: serde_yaml::Error) -> Self {
        Self::ParseYaml {
            origin: origin.to_string(),
            source,
        }
    }

    pub(crate) fn shape(origin: &str, detail: impl Into<String>) -> Self {
        Self::Shape {
            origin: origin.to_string(),
            detail: detail.into(),
        }
    }
}
