//! Attribute values carried by a change-set.
//!
//! Values arrive as arbitrary JSON. They are converted once, at load time,
//! into [`PlanValue`], a closed sum type the diff engine can match on
//! exhaustively.

use std::collections::BTreeMap;

use serde::de::{self, Deserialize, Deserializer};
use serde_json::value::RawValue;

/// A dynamically-typed attribute value.
///
/// Numbers keep the exact text they were written with, since the output is a
/// textual diff rather than computed data. Mapping keys iterate in sorted
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanValue {
    /// JSON `null`.
    Null,
    /// A string.
    String(String),
    /// A number, as the original text.
    Number(String),
    /// A boolean.
    Bool(bool),
    /// An ordered list.
    Sequence(Vec<PlanValue>),
    /// A string-keyed map.
    Mapping(BTreeMap<String, PlanValue>),
}

impl PlanValue {
    /// Returns the mapping if this value is one.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Returns true for `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true only for the literal `true`.
    #[must_use]
    pub const fn is_true(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    /// Builds a value from one raw JSON node.
    ///
    /// Containers are parsed again element by element, so every nested
    /// number goes through this function too.
    fn from_raw(raw: &RawValue) -> serde_json::Result<Self> {
        let text = raw.get().trim();
        match text.as_bytes().first() {
            Some(b'n') => Ok(Self::Null),
            Some(b't') => Ok(Self::Bool(true)),
            Some(b'f') => Ok(Self::Bool(false)),
            Some(b'"') => serde_json::from_str(text).map(Self::String),
            Some(b'[') => serde_json::from_str(text).map(Self::Sequence),
            Some(b'{') => serde_json::from_str(text).map(Self::Mapping),
            // Valid JSON leaves only numbers; keep the text as written.
            _ => Ok(Self::Number(text.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for PlanValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Self::from_raw(&raw).map_err(de::Error::custom)
    }
}

impl From<&str> for PlanValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}
