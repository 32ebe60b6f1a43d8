//! The standard scene block.
//!
//! Layout of one block (N = scene index):
//!
//! ```text
//! div#scene-container-N
//! ├── button#scene-N          "Scene N+1 / Click to add Sekai Stories JSON"
//! └── div#modal-N.modal
//!     └── div.modal-content
//!         ├── span#close-N.close
//!         ├── label[for=json-N]
//!         ├── textarea#json-N[name=json-N]
//!         ├── button#submit-N
//!         ├── button#remove-N
//!         └── button#reorder-N
//! ```

use super::element::Element;
use crate::scene::SceneIndex;

/// Element id prefixes; the scene index follows each one.
pub mod ids {
    pub const CONTAINER: &str = "scene-container-";
    pub const SCENE_BUTTON: &str = "scene-";
    pub const MODAL: &str = "modal-";
    pub const CLOSE: &str = "close-";
    pub const JSON: &str = "json-";
    pub const SUBMIT: &str = "submit-";
    pub const REMOVE: &str = "remove-";
    pub const REORDER: &str = "reorder-";
}

/// Concrete element id for `prefix` in the block of `index`.
pub fn element_id(prefix: &str, index: SceneIndex) -> String {
    format!("{prefix}{index}")
}

/// Uncompiled scene prototype using the default `INDEX` / `ORDINAL` tokens.
pub fn prototype() -> Element {
    let scoped = |prefix: &str| format!("{prefix}INDEX");

    Element::new("div")
        .with_id(scoped(ids::CONTAINER))
        .with_class("scene-container")
        .with_child(
            Element::new("button")
                .with_id(scoped(ids::SCENE_BUTTON))
                .with_class("scene-button")
                .with_text("Scene ORDINAL\nClick to add Sekai Stories JSON"),
        )
        .with_child(
            Element::new("div")
                .with_id(scoped(ids::MODAL))
                .with_class("modal")
                .with_child(
                    Element::new("div")
                        .with_class("modal-content")
                        .with_child(
                            Element::new("span")
                                .with_id(scoped(ids::CLOSE))
                                .with_class("close")
                                .with_text("×"),
                        )
                        .with_child(
                            Element::new("label")
                                .with_for(scoped(ids::JSON))
                                .with_text("Sekai Stories JSON"),
                        )
                        .with_child(
                            Element::new("textarea")
                                .with_id(scoped(ids::JSON))
                                .with_name(scoped(ids::JSON)),
                        )
                        .with_child(
                            Element::new("button")
                                .with_id(scoped(ids::SUBMIT))
                                .with_text("Save"),
                        )
                        .with_child(
                            Element::new("button")
                                .with_id(scoped(ids::REMOVE))
                                .with_text("Remove"),
                        )
                        .with_child(
                            Element::new("button")
                                .with_id(scoped(ids::REORDER))
                                .with_text("Reorder"),
                        ),
                ),
        )
}
