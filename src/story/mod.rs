//! Story import/export.
//!
//! - Export turns a story document into a `Download` of the story file.
//! - Import parses a story file leniently; rebuilding blocks from it is done by
//!   `StoryEditor::import_story`, which owns the index counter.
//! - `package`: the packaging request sent to the backend.

pub mod package;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{StoryError, StoryResult};
use crate::scene::StoryDocument;

/// MIME type of exported story files.
pub const STORY_CONTENT_TYPE: &str = "application/json";

// =============================================================================
// EXPORT
// =============================================================================

/// A story file ready to be handed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub content_type: &'static str,
    pub body: String,
}

impl Download {
    /// Writes the body to `dir/<file_name>` and returns the path.
    ///
    /// Only the final component of `file_name` is used.
    pub fn write_to(&self, dir: &Path) -> StoryResult<PathBuf> {
        let name = Path::new(&self.file_name).file_name().ok_or_else(|| {
            StoryError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid download file name {:?}", self.file_name),
            ))
        })?;
        let path = dir.join(name);
        std::fs::write(&path, &self.body)?;
        Ok(path)
    }
}

/// Serialises a document as `{"scenesData": [...]}`.
pub fn export(document: &StoryDocument, file_name: &str) -> StoryResult<Download> {
    let body = serde_json::to_string(document)?;
    tracing::info!(file_name, scenes = document.len(), "exported story");
    Ok(Download {
        file_name: file_name.to_string(),
        content_type: STORY_CONTENT_TYPE,
        body,
    })
}

// =============================================================================
// IMPORT
// =============================================================================

/// A story file as read back in. The stored index is kept only for display;
/// importing assigns fresh indices.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImportedStory {
    #[serde(rename = "scenesData")]
    pub scenes_data: Vec<ImportedScene>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImportedScene {
    #[serde(default)]
    pub index: Value,
    #[serde(default)]
    pub data: Value,
}

impl ImportedStory {
    /// Parses story file text.
    pub fn parse(text: &str) -> StoryResult<Self> {
        serde_json::from_str(text).map_err(StoryError::MalformedDocument)
    }

    pub fn len(&self) -> usize {
        self.scenes_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes_data.is_empty()
    }
}

impl From<StoryDocument> for ImportedStory {
    fn from(doc: StoryDocument) -> Self {
        Self {
            scenes_data: doc
                .scenes_data
                .into_iter()
                .map(|r| ImportedScene {
                    index: Value::from(r.index.get()),
                    data: r.data,
                })
                .collect(),
        }
    }
}

/// Editor text for imported scene data: two-space pretty JSON.
pub fn editor_text(data: &Value) -> StoryResult<String> {
    Ok(serde_json::to_string_pretty(data)?)
}
