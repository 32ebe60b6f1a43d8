//! Error types for the story editor.

use thiserror::Error;

use crate::scene::SceneIndex;

/// Result type alias for story operations.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur while editing, importing or exporting a story.
#[derive(Error, Debug)]
pub enum StoryError {
    /// Scene text entered by the user is not valid JSON.
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Reorder target could not be read as an integer.
    #[error("Invalid position: {0:?} is not an integer")]
    InvalidPosition(String),

    /// Reorder target outside `[0, len - 1]`.
    #[error("Invalid index: position {position} out of range for {length} scenes")]
    PositionOutOfRange { position: i64, length: usize },

    /// No live block exists for the given scene index.
    #[error("Scene block {0} not found")]
    BlockNotFound(SceneIndex),

    /// A template identifier lacks the placeholder and would repeat in every clone.
    #[error("Template {attribute} {value:?} does not contain placeholder {placeholder:?}")]
    UnscopedIdentifier {
        attribute: &'static str,
        value: String,
        placeholder: String,
    },

    /// Imported text is not a story document.
    #[error("Malformed story document: {0}")]
    MalformedDocument(#[source] serde_json::Error),

    /// Filesystem error while writing a download.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoryError {
    /// Creates an InvalidPosition error.
    pub fn invalid_position(input: impl Into<String>) -> Self {
        Self::InvalidPosition(input.into())
    }

    /// Creates a PositionOutOfRange error.
    pub fn position_out_of_range(position: i64, length: usize) -> Self {
        Self::PositionOutOfRange { position, length }
    }

    /// Creates an UnscopedIdentifier error.
    pub fn unscoped_identifier(
        attribute: &'static str,
        value: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self::UnscopedIdentifier {
            attribute,
            value: value.into(),
            placeholder: placeholder.into(),
        }
    }

    /// Creates a Serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

impl From<serde_json::Error> for StoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
