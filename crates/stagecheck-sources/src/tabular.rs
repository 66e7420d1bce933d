//! Tabular extractor: two-column rows of `status, project`.
//!
//! The published maintainers CSV has a header row whose first cell is
//! blank; it is dropped unread. Any further columns are ignored.

use crate::document::ClaimSource;
use crate::error::SourceError;
use serde::{Deserialize, Serialize};
use stagecheck_kernel::{ClaimMap, SourceClaims, normalize_status};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularRow {
    pub status: String,
    pub project: String,
}

impl TabularRow {
    pub fn new(status: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            project: project.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularDocument {
    pub rows: Vec<TabularRow>,
}

impl TabularDocument {
    pub fn new(rows: Vec<TabularRow>) -> Self {
        Self { rows }
    }

    /// Read CSV text: the first record is the header and is skipped; short
    /// records read missing cells as empty; cells are trimmed.
    pub fn from_csv_str(text: &str, origin: &str) -> Result<Self, SourceError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());
        let mut rows = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record.map_err(|source| SourceError::ParseCsv {
                origin: origin.to_string(),
                source,
            })?;
            if idx == 0 {
                continue;
            }
            rows.push(TabularRow::new(
                record.get(0).unwrap_or_default().trim(),
                record.get(1).unwrap_or_default().trim(),
            ));
        }
        Ok(Self { rows })
    }
}

impl ClaimSource for TabularDocument {
    fn claims(&self) -> SourceClaims {
        let mut claims = ClaimMap::new();
        for row in &self.rows {
            if row.project.trim().is_empty() {
                continue;
            }
            let Some(status) = normalize_status(&row.status) else {
                debug!(project = %row.project, "skipping tabular row without a status");
                continue;
            };
            claims.claim(&row.project, status);
        }
        SourceClaims::names_only(claims)
    }
}
