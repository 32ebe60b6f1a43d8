//! Scene records and the registry that owns them.
//!
//! This module provides:
//! - `model`: SceneIndex, SceneRecord and the StoryDocument file format
//! - `registry`: SceneRegistry with de-duplicating insert and index removal

pub mod model;
pub mod registry;

pub use model::{SceneIndex, SceneRecord, StoryDocument};
pub use registry::{InsertOutcome, SceneRegistry};
