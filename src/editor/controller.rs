//! StoryEditor: the single owner of scene state.
//!
//! Holds the scene registry, the live blocks, the template they are cloned
//! from and the session index counter. Every user interaction goes through
//! `handle`, which turns failures into an `Alert` so the page stays usable.

use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use super::action::SceneCommand;
use super::arena::{BlockArena, SceneBlock};
use super::reorder;
use crate::error::{StoryError, StoryResult};
use crate::scene::{InsertOutcome, SceneIndex, SceneRecord, SceneRegistry, StoryDocument};
use crate::story::package::ExportRequest;
use crate::story::{self, Download, ImportedStory};
use crate::template::Template;

/// Confirmation shown after a successful save.
pub const SAVED_MESSAGE: &str = "Scene saved!";

/// A message to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert(pub String);

impl Alert {
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Scene editor session.
pub struct StoryEditor {
    session: Uuid,
    template: Template,
    registry: SceneRegistry,
    blocks: BlockArena,
    /// Next index to hand out. Only ever increases.
    next_index: u64,
}

impl StoryEditor {
    // =========================================================================
    // INITIALIZATION
    // =========================================================================

    /// Creates an empty editor using the standard scene block.
    pub fn new() -> Self {
        Self::with_template(Template::scene())
    }

    /// Creates an empty editor cloning blocks from `template`.
    pub fn with_template(template: Template) -> Self {
        Self {
            session: Uuid::new_v4(),
            template,
            registry: SceneRegistry::new(),
            blocks: BlockArena::new(),
            next_index: 0,
        }
    }

    /// Session id recorded on log events.
    pub fn session_id(&self) -> Uuid {
        self.session
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn blocks(&self) -> &BlockArena {
        &self.blocks
    }

    pub fn block(&self, index: SceneIndex) -> Option<&SceneBlock> {
        self.blocks.get(index)
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// The index the next added scene will get.
    pub fn next_index(&self) -> SceneIndex {
        SceneIndex(self.next_index)
    }

    // =========================================================================
    // DISPATCH
    // =========================================================================

    /// Runs one user command. Returns the message to show, if any.
    pub fn handle(&mut self, command: SceneCommand) -> Option<Alert> {
        match command {
            SceneCommand::AddScene => {
                self.add_scene();
                None
            }
            SceneCommand::OpenEditor(index) => self.open_editor(index).err().map(Self::alert),
            SceneCommand::CloseEditor(index) => self.close_editor(index).err().map(Self::alert),
            SceneCommand::EditText { index, text } => {
                self.set_editor_text(index, text).err().map(Self::alert)
            }
            SceneCommand::Save { index, text } => {
                if let Some(text) = text {
                    if let Err(e) = self.set_editor_text(index, text) {
                        return Some(Self::alert(e));
                    }
                }
                match self.save_scene(index) {
                    Ok(_) => Some(Alert(SAVED_MESSAGE.to_string())),
                    Err(e) => Some(Self::alert(e)),
                }
            }
            SceneCommand::Delete(index) => self.delete_scene(index).err().map(Self::alert),
            SceneCommand::Reorder { index, input } => {
                let result = self.reorder_scene(index, &input);
                // The detail view closes whether or not the move succeeded.
                // A missing block is already the error carried by `result`.
                if let Ok(block) = self.blocks.require_mut(index) {
                    block.editor.open = false;
                }
                result
                    .err()
                    .map(|e| Alert(format!("Failed to set index: {e}")))
            }
        }
    }

    fn alert(error: StoryError) -> Alert {
        warn!(%error, "scene action failed");
        Alert(error.to_string())
    }

    // =========================================================================
    // SCENE OPERATIONS
    // =========================================================================

    /// Clones a new block for the next index and appends it to the container.
    pub fn add_scene(&mut self) -> SceneIndex {
        let index = SceneIndex(self.next_index);
        self.next_index += 1;
        self.blocks
            .append(SceneBlock::new(self.template.instantiate(index)));
        info!(session = %self.session, %index, "added scene block");
        index
    }

    /// Shows the detail view and fits the text surface to its content.
    pub fn open_editor(&mut self, index: SceneIndex) -> StoryResult<()> {
        let block = self.blocks.require_mut(index)?;
        block.editor.open = true;
        block.editor.auto_grow();
        Ok(())
    }

    /// Hides the detail view.
    pub fn close_editor(&mut self, index: SceneIndex) -> StoryResult<()> {
        self.blocks.require_mut(index)?.editor.open = false;
        Ok(())
    }

    /// Replaces the raw editor text.
    pub fn set_editor_text(&mut self, index: SceneIndex, text: impl Into<String>) -> StoryResult<()> {
        let block = self.blocks.require_mut(index)?;
        block.editor.text = text.into();
        if block.editor.open {
            block.editor.auto_grow();
        }
        Ok(())
    }

    /// Parses the editor text and stores it.
    ///
    /// Invalid JSON leaves the registry untouched and the editor open. On
    /// success the editor closes.
    pub fn save_scene(&mut self, index: SceneIndex) -> StoryResult<InsertOutcome> {
        let block = self.blocks.require_mut(index)?;
        let data: Value =
            serde_json::from_str(&block.editor.text).map_err(StoryError::InvalidJson)?;
        block.editor.open = false;

        let outcome = self.registry.insert(index, data);
        info!(session = %self.session, %index, ?outcome, "saved scene");
        Ok(outcome)
    }

    /// Detaches the block and drops its saved record.
    pub fn delete_scene(&mut self, index: SceneIndex) -> StoryResult<()> {
        self.blocks
            .detach(index)
            .ok_or(StoryError::BlockNotFound(index))?;
        let removed = self.registry.remove_by_index(index);
        info!(session = %self.session, %index, removed, "removed scene block");
        Ok(())
    }

    /// Moves a block to the position typed by the user.
    ///
    /// Only the display order changes; exports read it when they are built.
    pub fn reorder_scene(&mut self, index: SceneIndex, input: &str) -> StoryResult<()> {
        let target = reorder::parse_position(input)?;
        self.blocks.move_to(index, target)?;
        info!(session = %self.session, %index, target, "moved scene block");
        Ok(())
    }

    // =========================================================================
    // IMPORT / EXPORT
    // =========================================================================

    /// Saved records in block display order.
    pub fn document(&self) -> StoryDocument {
        StoryDocument::new(self.registry.ordered_by(self.blocks.order()))
    }

    /// Story file for the saved scenes, in display order.
    pub fn export(&self, file_name: &str) -> StoryResult<Download> {
        story::export(&self.document(), file_name)
    }

    /// Body for the packaging endpoint, in display order.
    pub fn packaging_request(&self, file_name: &str) -> ExportRequest {
        ExportRequest::new(file_name, self.document().scenes_data)
    }

    /// Parses and imports story file text. On a parse error nothing changes.
    pub fn import_str(&mut self, text: &str) -> StoryResult<Vec<SceneIndex>> {
        let story = ImportedStory::parse(text)?;
        self.import_story(story)
    }

    /// Replaces every scene with those of `story`.
    ///
    /// Each scene gets a fresh index from the session counter; stored indices
    /// are ignored.
    pub fn import_story(&mut self, story: ImportedStory) -> StoryResult<Vec<SceneIndex>> {
        let texts = story
            .scenes_data
            .iter()
            .map(|s| story::editor_text(&s.data))
            .collect::<StoryResult<Vec<_>>>()?;

        self.registry.reset();
        self.blocks.clear();

        let mut assigned = Vec::with_capacity(texts.len());
        for (scene, text) in story.scenes_data.into_iter().zip(texts) {
            let index = self.add_scene();
            self.blocks.require_mut(index)?.editor.text = text;
            self.registry.insert(index, scene.data);
            assigned.push(index);
        }
        info!(session = %self.session, scenes = assigned.len(), "imported story");
        Ok(assigned)
    }

    /// Saved records in registry order.
    pub fn records(&self) -> &[SceneRecord] {
        self.registry.snapshot()
    }
}

impl Default for StoryEditor {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn save(editor: &mut StoryEditor, index: SceneIndex, text: &str) -> Option<Alert> {
        editor.handle(SceneCommand::Save {
            index,
            text: Some(text.to_string()),
        })
    }

    #[test]
    fn test_single_scene_export() {
        let mut editor = StoryEditor::new();
        let index = editor.add_scene();
        assert_eq!(save(&mut editor, index, r#"{"a":1}"#), Some(Alert(SAVED_MESSAGE.to_string())));

        let download = editor.export("story.json").unwrap();
        assert_eq!(download.file_name, "story.json");
        assert_eq!(download.body, r#"{"scenesData":[{"index":0,"data":{"a":1}}]}"#);
    }

    #[test]
    fn test_invalid_json_keeps_editor_open() {
        let mut editor = StoryEditor::new();
        let first = editor.add_scene();
        let second = editor.add_scene();

        save(&mut editor, second, r#"{"b":2}"#);

        editor.handle(SceneCommand::OpenEditor(first));
        let alert = save(&mut editor, first, "{bad").unwrap();
        assert!(alert.message().starts_with("Invalid JSON: "));

        assert!(editor.block(first).unwrap().editor.open);
        assert_eq!(editor.records(), &[SceneRecord::new(1, json!({"b": 2}))]);
    }

    #[test]
    fn test_import_reassigns_indices() {
        let mut editor = StoryEditor::new();
        let text = r#"{"scenesData":[{"index":5,"data":{"x":"five"}},{"index":7,"data":[7]}]}"#;

        let assigned = editor.import_str(text).unwrap();
        assert_eq!(assigned, vec![SceneIndex(0), SceneIndex(1)]);
        assert_eq!(
            editor.records(),
            &[
                SceneRecord::new(0, json!({"x": "five"})),
                SceneRecord::new(1, json!([7])),
            ]
        );
        assert_eq!(editor.blocks().order(), &[SceneIndex(0), SceneIndex(1)]);
        assert_eq!(
            editor.block(SceneIndex(0)).unwrap().editor.text,
            "{\n  \"x\": \"five\"\n}"
        );
    }

    #[test]
    fn test_import_replaces_existing_scenes() {
        let mut editor = StoryEditor::new();
        let old = editor.add_scene();
        save(&mut editor, old, "1");
        editor.add_scene();

        let assigned = editor
            .import_str(r#"{"scenesData":[{"index":0,"data":"new"}]}"#)
            .unwrap();

        // The counter keeps running; indices are never reused in a session.
        assert_eq!(assigned, vec![SceneIndex(2)]);
        assert_eq!(editor.blocks().len(), 1);
        assert!(editor.block(old).is_none());
        assert_eq!(editor.records(), &[SceneRecord::new(2, json!("new"))]);
    }

    #[test]
    fn test_malformed_import_changes_nothing() {
        let mut editor = StoryEditor::new();
        let index = editor.add_scene();
        save(&mut editor, index, "true");

        assert!(editor.import_str("not json").is_err());
        assert_eq!(editor.records().len(), 1);
        assert_eq!(editor.blocks().len(), 1);
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut editor = StoryEditor::new();
        for text in [r#"{"a":1}"#, "[1,2,3]", r#""plain""#] {
            let index = editor.add_scene();
            save(&mut editor, index, text);
        }
        // Unsaved blocks are not part of the story.
        editor.add_scene();
        editor.handle(SceneCommand::Delete(SceneIndex(1)));

        let exported = editor.export("story.json").unwrap();
        let before: StoryDocument = serde_json::from_str(&exported.body).unwrap();

        let mut fresh = StoryEditor::new();
        fresh.import_str(&exported.body).unwrap();
        let after = fresh.registry().to_document();

        assert_eq!(after.data_values(), before.data_values());
        assert_eq!(after.data_values(), vec![&json!({"a": 1}), &json!("plain")]);
    }

    #[test]
    fn test_delete_removes_block_and_record() {
        let mut editor = StoryEditor::new();
        let index = editor.add_scene();
        save(&mut editor, index, "{}");

        assert_eq!(editor.handle(SceneCommand::Delete(index)), None);
        assert!(editor.blocks().is_empty());
        assert!(editor.registry().is_empty());

        let again = editor.handle(SceneCommand::Delete(index)).unwrap();
        assert_eq!(again.message(), "Scene block 0 not found");
    }

    #[test]
    fn test_indices_not_reused_after_delete() {
        let mut editor = StoryEditor::new();
        let a = editor.add_scene();
        editor.delete_scene(a).unwrap();
        assert_eq!(editor.add_scene(), SceneIndex(1));
    }

    #[test]
    fn test_duplicate_save_is_silent_noop() {
        let mut editor = StoryEditor::new();
        let index = editor.add_scene();
        save(&mut editor, index, r#"{"a":1}"#);
        let before = editor.registry().clone();

        assert_eq!(editor.save_scene(index).unwrap(), InsertOutcome::Duplicate);
        assert_eq!(editor.registry(), &before);
    }

    #[test]
    fn test_open_editor_auto_grows() {
        let mut editor = StoryEditor::new();
        let index = editor.add_scene();
        editor.set_editor_text(index, "{\n\"a\": 1\n}").unwrap();

        editor.handle(SceneCommand::OpenEditor(index));
        let block = editor.block(index).unwrap();
        assert!(block.editor.open);
        assert_eq!(block.editor.rows, 3);

        editor.handle(SceneCommand::CloseEditor(index));
        assert!(!editor.block(index).unwrap().editor.open);
    }

    #[test]
    fn test_reorder_updates_blocks_and_export_order() {
        let mut editor = StoryEditor::new();
        for text in ["0", "1", "2"] {
            let index = editor.add_scene();
            save(&mut editor, index, text);
        }

        editor.handle(SceneCommand::OpenEditor(SceneIndex(2)));
        let alert = editor.handle(SceneCommand::Reorder {
            index: SceneIndex(2),
            input: "0".to_string(),
        });
        assert_eq!(alert, None);
        assert!(!editor.block(SceneIndex(2)).unwrap().editor.open);

        assert_eq!(
            editor.blocks().order(),
            &[SceneIndex(2), SceneIndex(0), SceneIndex(1)]
        );
        let body = editor.export("story.json").unwrap().body;
        assert_eq!(
            body,
            r#"{"scenesData":[{"index":2,"data":2},{"index":0,"data":0},{"index":1,"data":1}]}"#
        );
    }

    #[test]
    fn test_reorder_rejects_bad_input() {
        let mut editor = StoryEditor::new();
        editor.add_scene();
        editor.add_scene();
        let order_before = editor.blocks().order().to_vec();

        for input in ["-1", "2", "abc"] {
            editor.handle(SceneCommand::OpenEditor(SceneIndex(0)));
            let alert = editor
                .handle(SceneCommand::Reorder {
                    index: SceneIndex(0),
                    input: input.to_string(),
                })
                .unwrap();
            assert!(alert.message().starts_with("Failed to set index: "));
            assert_eq!(editor.blocks().order(), order_before.as_slice());
            assert!(!editor.block(SceneIndex(0)).unwrap().editor.open);
        }

        let missing = editor
            .handle(SceneCommand::Reorder {
                index: SceneIndex(9),
                input: "0".to_string(),
            })
            .unwrap();
        assert_eq!(missing.message(), "Failed to set index: Scene block 9 not found");
    }

    #[test]
    fn test_save_after_reorder_exports_display_order() {
        let mut editor = StoryEditor::new();
        let a = editor.add_scene();
        let b = editor.add_scene();

        editor.reorder_scene(b, "0").unwrap();
        save(&mut editor, a, r#""a""#);
        save(&mut editor, b, r#""b""#);

        assert_eq!(editor.blocks().order(), &[b, a]);
        let body = editor.export("story.json").unwrap().body;
        assert_eq!(
            body,
            r#"{"scenesData":[{"index":1,"data":"b"},{"index":0,"data":"a"}]}"#
        );
        let packaged: Vec<_> = editor
            .packaging_request("mypack")
            .data
            .iter()
            .map(|r| r.index)
            .collect();
        assert_eq!(packaged, vec![b, a]);
    }

    #[test]
    fn test_same_position_reorder_keeps_export() {
        let mut editor = StoryEditor::new();
        let a = editor.add_scene();
        let b = editor.add_scene();

        save(&mut editor, b, r#""b""#);
        save(&mut editor, a, r#""a""#);
        let indices: Vec<_> = editor.records().iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![b, a]);

        let before = editor.export("story.json").unwrap().body;
        editor.reorder_scene(a, "0").unwrap();
        assert_eq!(editor.export("story.json").unwrap().body, before);

        let indices: Vec<_> = editor.records().iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![b, a]);
    }

    #[test]
    fn test_packaging_request_uses_registry() {
        let mut editor = StoryEditor::new();
        let index = editor.add_scene();
        save(&mut editor, index, r#"{"k":"v"}"#);

        let request = editor.packaging_request("mypack");
        assert_eq!(request.file_name, "mypack");
        assert_eq!(request.data, vec![SceneRecord::new(0, json!({"k": "v"}))]);
    }

    #[test]
    fn test_dispatch_by_element_id() {
        let mut editor = StoryEditor::new();
        editor.handle(SceneCommand::AddScene);

        let command = SceneCommand::from_element("submit-0", Some("[1]")).unwrap();
        assert_eq!(editor.handle(command), Some(Alert(SAVED_MESSAGE.to_string())));
        assert_eq!(editor.records(), &[SceneRecord::new(0, json!([1]))]);
    }

    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-z0-9 ]{0,8}".prop_map(Value::from),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                    .prop_map(|map| Value::Object(map.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_export_import_preserves_data(values in prop::collection::vec(json_value(), 0..8)) {
            let mut editor = StoryEditor::new();
            for value in &values {
                let index = editor.add_scene();
                let alert = save(&mut editor, index, &value.to_string());
                prop_assert_eq!(alert, Some(Alert(SAVED_MESSAGE.to_string())));
            }

            let body = editor.export("story.json").unwrap().body;
            let mut fresh = StoryEditor::new();
            fresh.import_str(&body).unwrap();

            let document = fresh.document();
            prop_assert_eq!(document.data_values(), values.iter().collect::<Vec<_>>());
        }
    }
}
