//! Data models for scenes and story documents.
//!
//! The serialized field names (`scenesData`, `index`, `data`) are the story file
//! format shared with the page script and the packaging endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// SCENE INDEX
// =============================================================================

/// Session-local scene identifier.
///
/// Handed out by a monotonically increasing counter and never reused within a
/// session, even after the scene holding it is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneIndex(pub u64);

impl SceneIndex {
    /// Returns the raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }

    /// One-based ordinal shown on the scene button.
    pub fn ordinal(self) -> u64 {
        self.0 + 1
    }

    /// Index from a JavaScript number. `None` unless it is a whole,
    /// non-negative number that fits in a `u64`.
    pub fn from_f64(value: f64) -> Option<Self> {
        // 2^64, the first value a u64 cannot hold
        const LIMIT: f64 = 18_446_744_073_709_551_616.0;
        if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < LIMIT {
            Some(Self(value as u64))
        } else {
            None
        }
    }
}

impl fmt::Display for SceneIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SceneIndex {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

// =============================================================================
// SCENE RECORD
// =============================================================================

/// One saved scene: its index plus opaque JSON content.
///
/// Equality is deep structural equality over `(index, data)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneRecord {
    pub index: SceneIndex,
    pub data: Value,
}

impl SceneRecord {
    /// Creates a new record.
    pub fn new(index: impl Into<SceneIndex>, data: Value) -> Self {
        Self {
            index: index.into(),
            data,
        }
    }

    /// Top-level keys of an object payload, empty for anything else.
    pub fn data_keys(&self) -> Vec<&str> {
        match &self.data {
            Value::Object(map) => map.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

// =============================================================================
// STORY DOCUMENT
// =============================================================================

/// The exported story file: every saved scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryDocument {
    #[serde(rename = "scenesData")]
    pub scenes_data: Vec<SceneRecord>,
}

impl StoryDocument {
    /// Creates a document from an ordered list of records.
    pub fn new(scenes_data: Vec<SceneRecord>) -> Self {
        Self { scenes_data }
    }

    /// Returns the number of scenes.
    pub fn len(&self) -> usize {
        self.scenes_data.len()
    }

    /// Returns true if the document holds no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes_data.is_empty()
    }

    /// Data payloads in document order.
    pub fn data_values(&self) -> Vec<&Value> {
        self.scenes_data.iter().map(|r| &r.data).collect()
    }
}
