//! Custom Story - scene editor core for building custom stories.
//!
//! A story is an ordered list of scenes, each holding arbitrary JSON. This
//! crate keeps the saved scene records, the scene blocks shown on the page
//! and the exported story file consistent with each other:
//!
//! - **Template cloning**: each block is stamped from one compiled prototype,
//!   with every element id scoped to the block's scene index
//! - **Scene registry**: at most one record per index, duplicate saves ignored
//! - **Reorder**: bounds-checked moves; exports follow the block order
//! - **Import/export**: `{"scenesData": [...]}` files, re-indexed on import
//!
//! # Example
//!
//! ```rust
//! use custom_story::{SceneCommand, StoryEditor};
//!
//! let mut editor = StoryEditor::new();
//! let index = editor.add_scene();
//!
//! // The user types JSON into the scene's editor and clicks Save
//! editor.handle(SceneCommand::Save { index, text: Some(r#"{"a":1}"#.to_string()) });
//!
//! let file = editor.export("story.json").unwrap();
//! assert_eq!(file.body, r#"{"scenesData":[{"index":0,"data":{"a":1}}]}"#);
//! ```

pub mod error;

pub mod editor;
pub mod scene;
pub mod story;
pub mod template;

// Re-exports for convenience
pub use editor::{Alert, SceneAction, SceneCommand, StoryEditor};
pub use error::{StoryError, StoryResult};
pub use scene::{InsertOutcome, SceneIndex, SceneRecord, SceneRegistry, StoryDocument};
pub use story::package::{ExportRequest, PackagingConfig};
pub use story::{Download, ImportedStory};
pub use template::{Element, Template};

#[cfg(feature = "packaging")]
pub use story::package::{PackagingClient, PackagingError};

#[cfg(feature = "wasm")]
pub use editor::JsStoryEditor;
