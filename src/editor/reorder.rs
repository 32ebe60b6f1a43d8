//! Moving a block to a new position among its siblings.

use crate::error::{StoryError, StoryResult};
use crate::scene::SceneIndex;

/// Reads a user-typed position. Surrounding whitespace is ignored.
pub fn parse_position(input: &str) -> StoryResult<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| StoryError::invalid_position(input))
}

/// Moves `item` so that it sits at `target` afterwards.
///
/// `target` must lie in `[0, siblings.len() - 1]`. On any error `siblings` is
/// left unchanged.
pub fn move_to_position(
    siblings: &mut Vec<SceneIndex>,
    item: SceneIndex,
    target: i64,
) -> StoryResult<()> {
    let current = siblings
        .iter()
        .position(|s| *s == item)
        .ok_or(StoryError::BlockNotFound(item))?;

    let length = siblings.len();
    let target = usize::try_from(target)
        .ok()
        .filter(|t| *t < length)
        .ok_or_else(|| StoryError::position_out_of_range(target, length))?;

    if target != current {
        let moved = siblings.remove(current);
        siblings.insert(target, moved);
    }
    Ok(())
}
