//! Canonical maturity statuses.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A canonical maturity status.
///
/// The five known stages have their own variants. Anything else a source
/// publishes is kept verbatim (trimmed, lowercased) in [`Status::Other`] so
/// vocabulary drift surfaces as a mismatch instead of being dropped.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Graduated,
    Incubating,
    Sandbox,
    Archived,
    Forming,
    Other(String),
}

impl Status {
    /// The known stages, in registry order.
    pub const KNOWN: [Status; 5] = [
        Status::Graduated,
        Status::Incubating,
        Status::Sandbox,
        Status::Archived,
        Status::Forming,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Status::Graduated => "graduated",
            Status::Incubating => "incubating",
            Status::Sandbox => "sandbox",
            Status::Archived => "archived",
            Status::Forming => "forming",
            Status::Other(raw) => raw,
        }
    }

    /// Whether this is one of the five known stages.
    pub fn is_known(&self) -> bool {
        !matches!(self, Status::Other(_))
    }

    /// Stages a registry category list may carry (archived and forming
    /// projects live in their own lists).
    pub fn is_category_stage(&self) -> bool {
        matches!(
            self,
            Status::Graduated | Status::Incubating | Status::Sandbox
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        crate::normalize::normalize_status(&raw)
            .ok_or_else(|| serde::de::Error::custom("status must not be empty"))
    }
}
