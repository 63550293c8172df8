//! Code-to-description lookup tables.
//!
//! The perimeter dataset stores containment methods and causes as small
//! integer codes. These tables turn them into readable labels; codes that
//! are missing, fractional, or not in the table describe as `None`.

use crate::constants::{CONTAINMENT_METHODS, FIRE_CAUSES};
use serde::{Deserialize, Serialize};

/// A single code and its description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
    pub code: i64,
    pub description: String,
}

/// Ordered table of code descriptions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeMapping {
    entries: Vec<CodeEntry>,
}

impl CodeMapping {
    /// Build a mapping from `(code, description)` pairs
    pub fn from_pairs(pairs: &[(i64, &str)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(code, description)| CodeEntry {
                    code: *code,
                    description: (*description).to_string(),
                })
                .collect(),
        }
    }

    /// Containment method table (8 entries)
    pub fn containment_methods() -> Self {
        Self::from_pairs(CONTAINMENT_METHODS)
    }

    /// Fire cause table (19 entries)
    pub fn fire_causes() -> Self {
        Self::from_pairs(FIRE_CAUSES)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CodeEntry] {
        &self.entries
    }

    /// Look up the description for an integer code
    pub fn describe(&self, code: i64) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.description.as_str())
    }

    /// Look up a code read from a float column.
    ///
    /// Codes arrive as floats whenever the source column contains blanks.
    /// `3.0` maps like `3`; `3.5`, NaN and nulls map to `None`.
    pub fn describe_value(&self, value: Option<f64>) -> Option<&str> {
        let value = value?;
        if !value.is_finite() || value.fract() != 0.0 {
            return None;
        }
        self.describe(value as i64)
    }
}
