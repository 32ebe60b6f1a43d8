//! Template cloning for scene blocks.
//!
//! A `Template` is compiled once from a prototype element tree whose id-like
//! attributes carry a placeholder token. Compilation splits each attribute
//! around the token, so instantiating for an index only joins segments and
//! cannot miss an identifier. An id-like attribute without the token is
//! rejected up front, since every clone would repeat it.
//!
//! - `element`: the Element tree shared by prototypes and instances
//! - `scene`: the standard scene block and its element id prefixes

pub mod element;
pub mod scene;

pub use element::Element;

use crate::error::{StoryError, StoryResult};
use crate::scene::SceneIndex;

/// Tokens recognised in a prototype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    /// Replaced by the instance index in `id`, `for` and `name`.
    pub index: String,
    /// Replaced by `index + 1` in text captions.
    pub ordinal: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            index: "INDEX".to_string(),
            ordinal: "ORDINAL".to_string(),
        }
    }
}

/// Literal segments around each occurrence of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Pattern {
    segments: Vec<String>,
}

impl Pattern {
    fn compile(raw: &str, token: &str) -> Self {
        let segments = if token.is_empty() {
            vec![raw.to_string()]
        } else {
            raw.split(token).map(str::to_string).collect()
        };
        Self { segments }
    }

    fn is_scoped(&self) -> bool {
        self.segments.len() > 1
    }

    fn render(&self, value: &str) -> String {
        self.segments.join(value)
    }
}

#[derive(Debug, Clone)]
struct TemplateNode {
    tag: String,
    id: Option<Pattern>,
    html_for: Option<Pattern>,
    name: Option<Pattern>,
    class: Option<String>,
    text: Option<Pattern>,
    children: Vec<TemplateNode>,
}

impl TemplateNode {
    fn compile(element: &Element, placeholders: &Placeholders) -> StoryResult<Self> {
        let scoped = |attribute: &'static str, raw: &Option<String>| -> StoryResult<Option<Pattern>> {
            match raw {
                None => Ok(None),
                Some(value) => {
                    let pattern = Pattern::compile(value, &placeholders.index);
                    if pattern.is_scoped() {
                        Ok(Some(pattern))
                    } else {
                        Err(StoryError::unscoped_identifier(
                            attribute,
                            value.clone(),
                            placeholders.index.clone(),
                        ))
                    }
                }
            }
        };

        Ok(Self {
            tag: element.tag.clone(),
            id: scoped("id", &element.id)?,
            html_for: scoped("for", &element.html_for)?,
            name: scoped("name", &element.name)?,
            class: element.class.clone(),
            text: element
                .text
                .as_deref()
                .map(|t| Pattern::compile(t, &placeholders.ordinal)),
            children: element
                .children
                .iter()
                .map(|c| Self::compile(c, placeholders))
                .collect::<StoryResult<_>>()?,
        })
    }

    fn render(&self, index: &str, ordinal: &str) -> Element {
        Element {
            tag: self.tag.clone(),
            id: self.id.as_ref().map(|p| p.render(index)),
            html_for: self.html_for.as_ref().map(|p| p.render(index)),
            name: self.name.as_ref().map(|p| p.render(index)),
            class: self.class.clone(),
            text: self.text.as_ref().map(|p| p.render(ordinal)),
            children: self
                .children
                .iter()
                .map(|c| c.render(index, ordinal))
                .collect(),
        }
    }
}

/// A cloned block bound to one scene index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub index: SceneIndex,
    pub root: Element,
    pub visible: bool,
}

/// Compiled prototype that stamps out per-index blocks.
#[derive(Debug, Clone)]
pub struct Template {
    prototype: Element,
    root: TemplateNode,
}

impl Template {
    /// Compiles `prototype`, checking that every id-like attribute is scoped.
    pub fn from_prototype(prototype: Element, placeholders: &Placeholders) -> StoryResult<Self> {
        let root = TemplateNode::compile(&prototype, placeholders)?;
        Ok(Self { prototype, root })
    }

    /// The standard scene block.
    pub fn scene() -> Self {
        Self::from_prototype(scene::prototype(), &Placeholders::default())
            .expect("Standard scene prototype must compile")
    }

    /// The uncompiled prototype. It is never shown.
    pub fn prototype(&self) -> &Element {
        &self.prototype
    }

    /// Stamps a visible block for `index`. The prototype is left untouched.
    pub fn instantiate(&self, index: SceneIndex) -> Block {
        let root = self
            .root
            .render(&index.to_string(), &index.ordinal().to_string());
        Block {
            index,
            root,
            visible: true,
        }
    }
}
