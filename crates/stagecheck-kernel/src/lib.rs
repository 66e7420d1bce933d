//! # Stagecheck Kernel
//!
//! Reconciles an authoritative project registry (name + expected maturity
//! stage) against claims published by loosely structured external sources.
//!
//! The kernel is I/O-free. Sources are parsed elsewhere and arrive here as
//! [`SourceClaims`]: a first-seen-wins mapping of project key to status and,
//! for sources that publish repository links, a project key to repository
//! path mapping.
//!
//! ## Architecture
//!
//! ```text
//! normalize_name / normalize_status   ← canonical keys and statuses
//!     │
//! RepoPath / paths_align              ← secondary identity from hosting URLs
//!     │
//! SourceClaims                        ← one source's claims (+ repo paths)
//!     │
//! Reconciler                          ← per-record two-stage lookup, diff
//!     │
//! AuditReport                         ← sorted mismatch rows, markdown render
//! ```

pub mod claims;
pub mod engine;
pub mod normalize;
pub mod record;
pub mod repo_path;
pub mod report;
pub mod status;

pub use claims::{ClaimMap, RepoIndex, RepoPathMap, RepoStatusMap, SourceClaims, SourceId};
pub use engine::{IndexedSource, Reconciler, resolve_claim};
pub use normalize::{normalize_name, normalize_status};
pub use record::{ExpectedRecord, MismatchRow};
pub use repo_path::{GITHUB_HOST, RepoPath, extract_github_path, paths_align};
pub use report::{AuditReport, NO_CLAIM_MARKER, SourceColumn, render_markdown};
pub use status::Status;
