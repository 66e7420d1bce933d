//! Report assembly: mismatch rows rendered for humans and tooling.

use crate::claims::SourceId;
use crate::record::MismatchRow;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Rendered in place of a status when a source made no claim.
pub const NO_CLAIM_MARKER: &str = "—";

const DEFAULT_TITLE: &str = "Project Status Audit";
const REGISTRY_COLUMN: &str = "Registry status";
const NO_MISMATCHES_LINE: &str = "_No mismatches found between the registry and external sources._";

/// One source column in the rendered table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceColumn {
    pub id: SourceId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SourceColumn {
    pub fn new(id: impl Into<SourceId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    fn header_cell(&self) -> String {
        match self.url.as_deref() {
            Some(url) => format!("[{}]({url})", self.label),
            None => self.label.clone(),
        }
    }
}

/// Reconciliation output for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub title: String,
    pub registry_ref: Option<String>,
    pub columns: Vec<SourceColumn>,
    pub rows: Vec<MismatchRow>,
}

impl AuditReport {
    pub fn new(columns: Vec<SourceColumn>, rows: Vec<MismatchRow>) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            registry_ref: None,
            columns,
            rows,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Link target for the registry column header (usually the manifest).
    pub fn with_registry_ref(mut self, registry_ref: impl Into<String>) -> Self {
        self.registry_ref = Some(registry_ref.into());
        self
    }

    pub fn mismatch_count(&self) -> usize {
        self.rows.len()
    }
}

/// Render the report as a Markdown document: a title, then either a
/// no-mismatch line or one table row per mismatch.
pub fn render_markdown(report: &AuditReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", report.title);
    out.push('\n');

    if report.rows.is_empty() {
        out.push_str(NO_MISMATCHES_LINE);
        out.push('\n');
        return out;
    }

    let registry_header = match report.registry_ref.as_deref() {
        Some(target) => format!("[{REGISTRY_COLUMN}]({target})"),
        None => REGISTRY_COLUMN.to_string(),
    };
    let mut header = vec!["Project".to_string(), registry_header];
    header.extend(report.columns.iter().map(SourceColumn::header_cell));
    push_table_row(&mut out, &header);
    out.push_str(&"|---".repeat(header.len()));
    out.push_str("|\n");

    for row in &report.rows {
        let mut cells = vec![row.name.clone(), row.expected_status.to_string()];
        cells.extend(report.columns.iter().map(|column| {
            row.observed_for(&column.id)
                .map(ToString::to_string)
                .unwrap_or_else(|| NO_CLAIM_MARKER.to_string())
        }));
        push_table_row(&mut out, &cells);
    }
    out
}

fn push_table_row(out: &mut String, cells: &[String]) {
    out.push('|');
    for cell in cells {
        let _ = write!(out, " {} |", escape_cell(cell));
    }
    out.push('\n');
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
}
