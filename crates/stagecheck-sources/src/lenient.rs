//! Tolerant deserialization for loosely structured source documents.
//!
//! Published YAML routinely carries `null` where a list is expected, or a
//! stray scalar among a list of objects. A whole document must not fail
//! over one bad record, so lists drop entries that do not fit and scalar
//! fields accept any scalar.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::ops::Deref;
use tracing::debug;

/// A list that deserializes from anything: `null` or a non-list reads as
/// empty, and entries that fail to deserialize as `T` are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LenientList<T>(Vec<T>);

impl<T> LenientList<T> {
    pub fn push(&mut self, item: T) {
        self.0.push(item);
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> Default for LenientList<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> From<Vec<T>> for LenientList<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<T> Deref for LenientList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for LenientList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Value::Sequence(entries) = Value::deserialize(deserializer)? else {
            return Ok(Self::default());
        };
        let items = entries
            .into_iter()
            .enumerate()
            .filter_map(|(idx, entry)| match serde_yaml::from_value::<T>(entry) {
                Ok(item) => Some(item),
                Err(err) => {
                    debug!(index = idx, "skipping malformed list entry: {err}");
                    None
                }
            })
            .collect();
        Ok(Self(items))
    }
}

/// Deserialize an optional text field from any scalar. Mappings, lists and
/// `null` read as absent.
pub fn scalar_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    })
}

/// First candidate that is non-empty after trimming, trimmed.
pub(crate) fn first_non_blank<'a>(
    candidates: impl IntoIterator<Item = Option<&'a str>>,
) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|text| !text.is_empty())
}
