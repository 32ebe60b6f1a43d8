//! WASM bindings for the scene editor.
//!
//! The page script keeps a single `JsStoryEditor`, forwards every click on a
//! scene block as `(elementId, value)` and re-renders blocks from `blocks()`.

use js_sys::Array;
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

use super::action::{SceneCommand, REORDER_PROMPT_DEFAULT};
use super::arena::SceneBlock;
use super::controller::StoryEditor;
use crate::error::StoryError;
use crate::scene::SceneIndex;
use crate::template::Element;

fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&Serializer::new().serialize_maps_as_objects(true))
}

// =============================================================================
// ERROR CONVERSION
// =============================================================================

impl From<StoryError> for JsValue {
    fn from(err: StoryError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

macro_rules! js_result {
    ($expr:expr) => {
        $expr.map_err(|e: StoryError| JsValue::from(e))
    };
}

/// Rendering view of one block.
#[derive(Serialize)]
struct BlockView<'a> {
    index: u64,
    visible: bool,
    root: &'a Element,
    editor_open: bool,
    editor_text: &'a str,
    editor_rows: usize,
}

impl<'a> From<&'a SceneBlock> for BlockView<'a> {
    fn from(block: &'a SceneBlock) -> Self {
        Self {
            index: block.index().get(),
            visible: block.block.visible,
            root: &block.block.root,
            editor_open: block.editor.open,
            editor_text: &block.editor.text,
            editor_rows: block.editor.rows,
        }
    }
}

/// Story file handed to the browser for download.
#[derive(Serialize)]
struct DownloadView<'a> {
    file_name: &'a str,
    content_type: &'a str,
    body: &'a str,
}

// =============================================================================
// MAIN WRAPPER TYPE
// =============================================================================

/// JavaScript-friendly wrapper around StoryEditor.
#[wasm_bindgen]
pub struct JsStoryEditor {
    inner: StoryEditor,
}

#[wasm_bindgen]
impl JsStoryEditor {
    /// Creates an empty editor.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// const editor = new JsStoryEditor();
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsStoryEditor {
        JsStoryEditor {
            inner: StoryEditor::new(),
        }
    }

    /// Adds a scene block, returns its index.
    #[wasm_bindgen(js_name = addScene)]
    pub fn add_scene(&mut self) -> f64 {
        self.inner.add_scene().get() as f64
    }

    /// Handles a click on a block element.
    ///
    /// `value` is the textarea content for `submit-N` and the prompt answer
    /// for `reorder-N`. Returns the alert text to show, or undefined.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// scrollmenu.addEventListener('click', (event) => {
    ///   const id = event.target.id;
    ///   let value;
    ///   if (id.startsWith('submit-')) value = document.getElementById(id.replace('submit-', 'json-')).value;
    ///   if (id.startsWith('reorder-')) value = prompt('New index', editor.reorderPromptDefault());
    ///   const alertText = editor.dispatch(id, value);
    ///   if (alertText) alert(alertText);
    ///   render(editor.blocks());
    /// });
    /// ```
    pub fn dispatch(&mut self, element_id: &str, value: Option<String>) -> Option<String> {
        let command = SceneCommand::from_element(element_id, value.as_deref())?;
        self.inner.handle(command).map(|alert| alert.0)
    }

    /// Default answer for the reorder prompt.
    #[wasm_bindgen(js_name = reorderPromptDefault)]
    pub fn reorder_prompt_default(&self) -> String {
        REORDER_PROMPT_DEFAULT.to_string()
    }

    /// All live blocks in display order.
    pub fn blocks(&self) -> Result<JsValue, JsValue> {
        let views: Vec<BlockView<'_>> = self.inner.blocks().iter().map(BlockView::from).collect();
        Ok(to_js_value(&views)?)
    }

    /// One block by index, null if it was removed or `index` is not a
    /// whole non-negative number.
    pub fn block(&self, index: f64) -> Result<JsValue, JsValue> {
        match SceneIndex::from_f64(index).and_then(|index| self.inner.block(index)) {
            Some(block) => Ok(to_js_value(&BlockView::from(block))?),
            None => Ok(JsValue::NULL),
        }
    }

    /// Saved scenes as `{scenesData: [...]}`, in display order.
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        Ok(to_js_value(&self.inner.document())?)
    }

    /// Builds the story file download.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// const file = editor.exportStory(document.getElementById('storyfile').value);
    /// const url = URL.createObjectURL(new Blob([file.body], { type: file.content_type }));
    /// ```
    #[wasm_bindgen(js_name = exportStory)]
    pub fn export_story(&self, file_name: &str) -> Result<JsValue, JsValue> {
        let download = js_result!(self.inner.export(file_name))?;
        let view = DownloadView {
            file_name: &download.file_name,
            content_type: download.content_type,
            body: &download.body,
        };
        Ok(to_js_value(&view)?)
    }

    /// Replaces all scenes with those in a story file. Returns the new indices.
    #[wasm_bindgen(js_name = importStory)]
    pub fn import_story(&mut self, text: &str) -> Result<Array, JsValue> {
        let assigned = js_result!(self.inner.import_str(text))?;
        let array = Array::new();
        for index in assigned {
            array.push(&JsValue::from_f64(index.get() as f64));
        }
        Ok(array)
    }

    /// JSON body for `POST /export-custom-story`.
    #[wasm_bindgen(js_name = packagingBody)]
    pub fn packaging_body(&self, file_name: &str) -> Result<String, JsValue> {
        let request = self.inner.packaging_request(file_name);
        serde_json::to_string(&request).map_err(|e| JsValue::from(StoryError::from(e)))
    }
}

impl Default for JsStoryEditor {
    fn default() -> Self {
        Self::new()
    }
}
