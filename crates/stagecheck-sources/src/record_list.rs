//! Record-list extractor: a flat YAML list of project objects
//! (clomonitor's foundation data file).

use crate::document::ClaimSource;
use crate::error::SourceError;
use crate::lenient::{LenientList, first_non_blank, scalar_text};
use serde::Deserialize;
use stagecheck_kernel::{ClaimMap, SourceClaims, Status, normalize_status};
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordListEntry {
    #[serde(default, deserialize_with = "scalar_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub maturity: Option<String>,
}

impl RecordListEntry {
    /// `display_name`, falling back to the `name` slug.
    pub fn label(&self) -> Option<&str> {
        first_non_blank([self.display_name.as_deref(), self.name.as_deref()])
    }

    pub fn status(&self) -> Option<Status> {
        self.maturity.as_deref().and_then(normalize_status)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RecordListDocument {
    pub entries: LenientList<RecordListEntry>,
}

impl RecordListDocument {
    /// Parse a YAML list. A top level that is not a list yields an empty
    /// document; non-object entries are dropped.
    pub fn from_yaml_str(text: &str, origin: &str) -> Result<Self, SourceError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|err| SourceError::yaml(origin, err))
    }
}

impl ClaimSource for RecordListDocument {
    fn claims(&self) -> SourceClaims {
        let mut claims = ClaimMap::new();
        for entry in self.entries.iter() {
            let Some(label) = entry.label() else {
                debug!("skipping record without a name");
                continue;
            };
            let Some(status) = entry.status() else {
                debug!(project = label, "skipping record without a maturity");
                continue;
            };
            claims.claim(label, status);
        }
        SourceClaims::names_only(claims)
    }
}
