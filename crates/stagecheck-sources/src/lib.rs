//! # stagecheck-sources
//!
//! Source layer: turns each external document into a
//! [`SourceClaims`](stagecheck_kernel::SourceClaims) the kernel can
//! reconcile.
//!
//! This crate provides:
//! - one document type per source shape, each implementing [`ClaimSource`]
//! - [`SourceDocument`], the tagged union the CLI configures by [`SourceKind`]
//! - text loaders (YAML, CSV, HTML, Markdown) for each shape
//! - the authoritative registry [`Manifest`]
//!
//! Retrieval and caching of the raw documents are not handled here.
//!
//! ## Shapes
//!
//! ```text
//! tree             category → subcategory → item   (names, statuses, repo paths)
//! tabular          status,project rows             (names, statuses)
//! record_list      flat list of project objects    (names, statuses)
//! heading_grouped  table rows under status headers (names, statuses)
//! indent_grouped   nested bullet list              (names, statuses)
//! ```

pub mod document;
pub mod error;
pub mod heading_grouped;
pub mod indent_grouped;
pub mod lenient;
pub mod manifest;
pub mod record_list;
pub mod tabular;
pub mod tree;

pub use document::{ClaimSource, SourceDocument, SourceKind};
pub use error::SourceError;
pub use heading_grouped::{HeadingDocument, Row};
pub use indent_grouped::IndentDocument;
pub use lenient::LenientList;
pub use manifest::{Manifest, ManifestItem};
pub use record_list::{RecordListDocument, RecordListEntry};
pub use tabular::{TabularDocument, TabularRow};
pub use tree::{LandscapeCategory, LandscapeItem, LandscapeSubcategory, LandscapeTree};
