//! Scene editor: live blocks and the controller that drives them.
//!
//! This module provides:
//! - `controller`: StoryEditor, the single owner of registry, blocks and counter
//! - `action`: element-id dispatch table and SceneCommand
//! - `arena`: BlockArena of cloned blocks with their editor surfaces
//! - `reorder`: bounds-checked sibling moves
//! - `wasm`: WASM bindings for the page script (JsStoryEditor)

pub mod action;
pub mod arena;
pub mod controller;
pub mod reorder;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use action::{SceneAction, SceneCommand, REORDER_PROMPT_DEFAULT};
pub use arena::{BlockArena, EditorSurface, SceneBlock};
pub use controller::{Alert, StoryEditor, SAVED_MESSAGE};

#[cfg(feature = "wasm")]
pub use wasm::JsStoryEditor;
