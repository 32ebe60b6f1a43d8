//! Element-id dispatch table.
//!
//! Every interactive element inside a block carries an id of the form
//! `<prefix><index>`. Instead of binding handlers per clone, the page forwards
//! the clicked element's id here and gets back a command keyed by scene index.

use crate::scene::SceneIndex;
use crate::template::scene::ids;

/// Pre-filled answer shown when asking for a reorder target.
pub const REORDER_PROMPT_DEFAULT: &str = "0";

/// Something the user can do to one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneAction {
    OpenEditor,
    CloseEditor,
    Save,
    Delete,
    Reorder,
}

const DISPATCH: &[(&str, Option<SceneAction>)] = &[
    (ids::CONTAINER, None),
    (ids::SCENE_BUTTON, Some(SceneAction::OpenEditor)),
    (ids::MODAL, Some(SceneAction::CloseEditor)),
    (ids::CLOSE, Some(SceneAction::CloseEditor)),
    (ids::JSON, None),
    (ids::SUBMIT, Some(SceneAction::Save)),
    (ids::REMOVE, Some(SceneAction::Delete)),
    (ids::REORDER, Some(SceneAction::Reorder)),
];

impl SceneAction {
    /// Maps an element id to its action and owning scene.
    ///
    /// Returns None for ids outside the table and for passive elements such as
    /// the container or the textarea.
    pub fn from_element_id(element_id: &str) -> Option<(SceneAction, SceneIndex)> {
        DISPATCH.iter().find_map(|&(prefix, action)| {
            let rest = element_id.strip_prefix(prefix)?;
            if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let index = rest.parse::<u64>().ok()?;
            action.map(|a| (a, SceneIndex(index)))
        })
    }
}

/// A request handled by `StoryEditor::handle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneCommand {
    /// Clone a new block at the end of the container.
    AddScene,
    OpenEditor(SceneIndex),
    CloseEditor(SceneIndex),
    /// Replace the editor text (typing into the textarea).
    EditText { index: SceneIndex, text: String },
    /// Parse and store the editor text. `text`, when given, is written to the
    /// editor first.
    Save {
        index: SceneIndex,
        text: Option<String>,
    },
    Delete(SceneIndex),
    /// Move the block to the position typed by the user.
    Reorder { index: SceneIndex, input: String },
}

impl SceneCommand {
    /// Builds a command from a clicked element id.
    ///
    /// `value` is the textarea content for Save and the prompt answer for
    /// Reorder; a missing answer is treated as an empty string.
    pub fn from_element(element_id: &str, value: Option<&str>) -> Option<Self> {
        let (action, index) = SceneAction::from_element_id(element_id)?;
        Some(match action {
            SceneAction::OpenEditor => Self::OpenEditor(index),
            SceneAction::CloseEditor => Self::CloseEditor(index),
            SceneAction::Save => Self::Save {
                index,
                text: value.map(str::to_string),
            },
            SceneAction::Delete => Self::Delete(index),
            SceneAction::Reorder => Self::Reorder {
                index,
                input: value.unwrap_or_default().to_string(),
            },
        })
    }
}
