//! Live scene blocks and their sibling order.

use std::collections::HashMap;

use super::reorder;
use crate::error::{StoryError, StoryResult};
use crate::scene::SceneIndex;
use crate::template::Block;

/// The text-entry surface inside a block's detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSurface {
    pub open: bool,
    pub text: String,
    /// Visible height in lines.
    pub rows: usize,
}

impl Default for EditorSurface {
    fn default() -> Self {
        Self {
            open: false,
            text: String::new(),
            rows: 1,
        }
    }
}

impl EditorSurface {
    /// Resizes the surface to fit its content.
    pub fn auto_grow(&mut self) {
        self.rows = self.text.lines().count().max(1);
    }
}

/// A cloned block plus its editor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneBlock {
    pub block: Block,
    pub editor: EditorSurface,
}

impl SceneBlock {
    /// Wraps a freshly cloned block with a closed, empty editor.
    pub fn new(block: Block) -> Self {
        Self {
            block,
            editor: EditorSurface::default(),
        }
    }

    pub fn index(&self) -> SceneIndex {
        self.block.index
    }
}

/// Arena of live blocks keyed by scene index, plus their display order.
#[derive(Debug, Clone, Default)]
pub struct BlockArena {
    blocks: HashMap<SceneIndex, SceneBlock>,
    order: Vec<SceneIndex>,
}

impl BlockArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a block at the end of the container.
    pub fn append(&mut self, block: SceneBlock) {
        let index = block.index();
        if self.blocks.insert(index, block).is_none() {
            self.order.push(index);
        }
    }

    /// Removes a block from the container and returns it.
    pub fn detach(&mut self, index: SceneIndex) -> Option<SceneBlock> {
        let block = self.blocks.remove(&index)?;
        self.order.retain(|i| *i != index);
        Some(block)
    }

    /// Removes every block.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.order.clear();
    }

    pub fn get(&self, index: SceneIndex) -> Option<&SceneBlock> {
        self.blocks.get(&index)
    }

    /// Gets a block, failing with `BlockNotFound`.
    pub fn require_mut(&mut self, index: SceneIndex) -> StoryResult<&mut SceneBlock> {
        self.blocks
            .get_mut(&index)
            .ok_or(StoryError::BlockNotFound(index))
    }

    /// Block indices in display order.
    pub fn order(&self) -> &[SceneIndex] {
        &self.order
    }

    /// Blocks in display order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneBlock> {
        self.order.iter().filter_map(|i| self.blocks.get(i))
    }

    /// Moves the block for `index` to display position `target`.
    pub fn move_to(&mut self, index: SceneIndex, target: i64) -> StoryResult<()> {
        reorder::move_to_position(&mut self.order, index, target)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
