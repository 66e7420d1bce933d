//! Normalizers: raw text to canonical project keys and statuses.
//!
//! Every join across sources goes through these two functions. Both are
//! total and idempotent.

use crate::status::Status;

/// Canonical project key: trimmed and lowercased.
///
/// An empty key means "no claim"; callers skip it.
pub fn normalize_name(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Map raw status text onto a canonical [`Status`].
///
/// Returns `None` for empty (or whitespace-only) input. Unrecognized text
/// passes through as [`Status::Other`] holding its trimmed, lowercased form,
/// so normalizing `status.as_str()` again yields the same status.
pub fn normalize_status(text: &str) -> Option<Status> {
    let value = text.trim().to_lowercase();
    let status = match value.as_str() {
        "" => return None,
        "graduated" => Status::Graduated,
        "incubating" | "incubator" => Status::Incubating,
        "sandbox" => Status::Sandbox,
        "archived" | "archive" | "archieve" | "retired" => Status::Archived,
        "formation - exploratory" | "forming" | "form" | "exploratory" => Status::Forming,
        _ => Status::Other(value),
    };
    Some(status)
}
