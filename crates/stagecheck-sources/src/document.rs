//! The extractor capability and its five tagged variants.

use crate::error::SourceError;
use crate::heading_grouped::HeadingDocument;
use crate::indent_grouped::IndentDocument;
use crate::record_list::RecordListDocument;
use crate::tabular::TabularDocument;
use crate::tree::LandscapeTree;
use serde::{Deserialize, Serialize};
use stagecheck_kernel::SourceClaims;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// A parsed document that can be reduced to claims.
///
/// Implementations keep the first claim seen for a project key and skip
/// records without a usable name or status.
pub trait ClaimSource {
    fn claims(&self) -> SourceClaims;
}

/// Which document shape a configured source has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Tree,
    Tabular,
    RecordList,
    HeadingGrouped,
    IndentGrouped,
}

impl SourceKind {
    pub const ALL: [SourceKind; 5] = [
        SourceKind::Tree,
        SourceKind::Tabular,
        SourceKind::RecordList,
        SourceKind::HeadingGrouped,
        SourceKind::IndentGrouped,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Tree => "tree",
            SourceKind::Tabular => "tabular",
            SourceKind::RecordList => "record_list",
            SourceKind::HeadingGrouped => "heading_grouped",
            SourceKind::IndentGrouped => "indent_grouped",
        }
    }

    /// Whether documents of this kind publish repository links.
    pub fn provides_repo_paths(self) -> bool {
        matches!(self, SourceKind::Tree)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        SourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| SourceError::UnknownKind(s.to_string()))
    }
}

/// One parsed source document, tagged by shape.
#[derive(Debug, Clone)]
pub enum SourceDocument {
    Tree(LandscapeTree),
    Tabular(TabularDocument),
    RecordList(RecordListDocument),
    HeadingGrouped(HeadingDocument),
    IndentGrouped(IndentDocument),
}

impl SourceDocument {
    /// Parse raw document text as the given kind. `origin` names the
    /// document in error messages.
    pub fn parse(kind: SourceKind, text: &str, origin: &str) -> Result<Self, SourceError> {
        Ok(match kind {
            SourceKind::Tree => Self::Tree(LandscapeTree::from_yaml_str(text, origin)?),
            SourceKind::Tabular => Self::Tabular(TabularDocument::from_csv_str(text, origin)?),
            SourceKind::RecordList => {
                Self::RecordList(RecordListDocument::from_yaml_str(text, origin)?)
            }
            SourceKind::HeadingGrouped => Self::HeadingGrouped(HeadingDocument::from_html(text)),
            SourceKind::IndentGrouped => Self::IndentGrouped(IndentDocument::from_markdown(text)),
        })
    }

    /// Read and parse a document from disk.
    pub fn load(kind: SourceKind, path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SourceError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(kind, &text, &path.display().to_string())
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Tree(_) => SourceKind::Tree,
            Self::Tabular(_) => SourceKind::Tabular,
            Self::RecordList(_) => SourceKind::RecordList,
            Self::HeadingGrouped(_) => SourceKind::HeadingGrouped,
            Self::IndentGrouped(_) => SourceKind::IndentGrouped,
        }
    }

    fn as_claim_source(&self) -> &dyn ClaimSource {
        match self {
            Self::Tree(doc) => doc,
            Self::Tabular(doc) => doc,
            Self::RecordList(doc) => doc,
            Self::HeadingGrouped(doc) => doc,
            Self::IndentGrouped(doc) => doc,
        }
    }
}

impl ClaimSource for SourceDocument {
    fn claims(&self) -> SourceClaims {
        let claims = self.as_claim_source().claims();
        debug!(
            kind = %self.kind(),
            claims = claims.by_name.len(),
            unrecognized = claims
                .by_name
                .iter()
                .filter(|(_, status)| !status.is_known())
                .count(),
            repo_paths = claims.repos.as_ref().map_or(0, |repos| repos.paths.len()),
            "extracted source claims"
        );
        claims
    }
}
