//! Heading-grouped extractor: table rows under status header rows
//! (the devstats landing page).
//!
//! A row is a header when any of its cells reads exactly `Graduated`,
//! `Incubating`, `Sandbox` or `Archived`. Every later non-header row claims
//! the text of each of its links under the most recent header. Rows before
//! the first header contribute nothing.

use crate::document::ClaimSource;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use stagecheck_kernel::{ClaimMap, SourceClaims, Status};

const HEADER_LABELS: [(&str, Status); 4] = [
    ("Graduated", Status::Graduated),
    ("Incubating", Status::Incubating),
    ("Sandbox", Status::Sandbox),
    ("Archived", Status::Archived),
];

/// Visible text of one table row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Text of each `th`/`td` cell.
    pub cells: Vec<String>,
    /// Text of each hyperlink in the row.
    pub links: Vec<String>,
}

impl Row {
    pub fn header(label: &str) -> Self {
        Self {
            cells: vec![label.to_string()],
            links: Vec::new(),
        }
    }

    pub fn with_links<I, S>(links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: Vec::new(),
            links: links.into_iter().map(Into::into).collect(),
        }
    }

    /// The status this row opens a section for, if it is a header row.
    pub fn header_status(&self) -> Option<Status> {
        self.cells.iter().find_map(|cell| {
            let text = cell.trim();
            HEADER_LABELS
                .iter()
                .find(|(label, _)| *label == text)
                .map(|(_, status)| status.clone())
        })
    }
}

/// Scan state over the row sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    NoSection,
    InSection(Status),
}

/// Advance the scan by one row, recording claims for link rows.
pub fn step(state: ScanState, row: &Row, claims: &mut ClaimMap) -> ScanState {
    if let Some(status) = row.header_status() {
        return ScanState::InSection(status);
    }
    if let ScanState::InSection(status) = &state {
        for link in &row.links {
            claims.claim(link, status.clone());
        }
    }
    state
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingDocument {
    pub rows: Vec<Row>,
}

impl HeadingDocument {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Collect every `<tr>` of an HTML page in document order.
    pub fn from_html(html: &str) -> Self {
        let page = Html::parse_document(html);
        let row_selector = Selector::parse("tr").expect("row selector");
        let cell_selector = Selector::parse("th, td").expect("cell selector");
        let link_selector = Selector::parse("a").expect("link selector");

        let rows = page
            .select(&row_selector)
            .map(|row| Row {
                cells: row.select(&cell_selector).map(visible_text).collect(),
                links: row.select(&link_selector).map(visible_text).collect(),
            })
            .collect();
        Self { rows }
    }
}

fn visible_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

impl ClaimSource for HeadingDocument {
    fn claims(&self) -> SourceClaims {
        let mut claims = ClaimMap::new();
        self.rows.iter().fold(ScanState::NoSection, |state, row| {
            step(state, row, &mut claims)
        });
        SourceClaims::names_only(claims)
    }
}
