//! Indentation-grouped extractor: a Markdown bullet list whose top-level
//! bullets are section headings (the artwork README).
//!
//! ```text
//! * Graduated Projects        ← heading, opens a section
//!   * [Envoy](envoy/)         ← project under the open section
//!   * etcd
//! * Other Heading             ← unrecognized heading, closes the section
//!   * etcd                    ← ignored
//! ```

use crate::document::ClaimSource;
use regex::Regex;
use stagecheck_kernel::{ClaimMap, SourceClaims, Status};
use std::sync::LazyLock;

const BULLET: &str = "* ";
const SOFT_BREAK: &str = "  ";
const SECTION_HEADINGS: [(&str, Status); 4] = [
    ("graduated projects", Status::Graduated),
    ("incubating projects", Status::Incubating),
    ("sandbox projects", Status::Sandbox),
    ("archived projects", Status::Archived),
];

static LEADING_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\]]*)\]").expect("markdown link regex"));

/// How a single line participates in the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Whitespace only; never changes state.
    Blank,
    /// A bullet at the top indentation level.
    Heading(String),
    /// An indented bullet.
    Item(String),
    /// Anything else (prose, other markup).
    Other,
}

impl LineKind {
    pub fn classify(line: &str) -> Self {
        if line.trim().is_empty() {
            return LineKind::Blank;
        }
        if line.starts_with(BULLET) {
            return LineKind::Heading(bullet_text(line));
        }
        if line.trim_start().starts_with(BULLET) {
            return LineKind::Item(bullet_text(line));
        }
        LineKind::Other
    }
}

/// Text of a bullet line: the part after the first `*`, with a leading
/// Markdown link unwrapped to its label, anything after a double-space soft
/// break dropped, and stray list punctuation trimmed.
pub fn bullet_text(line: &str) -> String {
    let Some(star) = line.find('*') else {
        return String::new();
    };
    let mut text = line[star + 1..].trim();
    if let Some(label) = LEADING_LINK.captures(text).and_then(|caps| caps.get(1)) {
        text = label.as_str().trim();
    }
    let text = text.split(SOFT_BREAK).next().unwrap_or_default().trim();
    text.trim_matches(|c: char| matches!(c, '*' | '-' | '_' | ' '))
        .trim()
        .to_string()
}

/// The status a heading names, matched case-insensitively.
pub fn heading_status(text: &str) -> Option<Status> {
    let folded = text.to_lowercase();
    SECTION_HEADINGS
        .iter()
        .find(|(heading, _)| *heading == folded)
        .map(|(_, status)| status.clone())
}

/// Scan state over the line sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    NoSection,
    InSection(Status),
}

/// Advance the scan by one line, recording a claim for project lines.
///
/// A heading either opens a section or, when unrecognized, closes the
/// current one; it never claims. Blank and other lines leave the state as
/// it was.
pub fn step(state: ScanState, line: &str, claims: &mut ClaimMap) -> ScanState {
    match LineKind::classify(line) {
        LineKind::Heading(text) => match heading_status(&text) {
            Some(status) => ScanState::InSection(status),
            None => ScanState::NoSection,
        },
        LineKind::Item(name) => {
            if let ScanState::InSection(status) = &state {
                claims.claim(&name, status.clone());
            }
            state
        }
        LineKind::Blank | LineKind::Other => state,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndentDocument {
    pub lines: Vec<String>,
}

impl IndentDocument {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_markdown(text: &str) -> Self {
        Self::new(text.lines())
    }
}

impl ClaimSource for IndentDocument {
    fn claims(&self) -> SourceClaims {
        let mut claims = ClaimMap::new();
        self.lines.iter().fold(ScanState::NoSection, |state, line| {
            step(state, line, &mut claims)
        });
        SourceClaims::names_only(claims)
    }
}
