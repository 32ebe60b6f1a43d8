//! Minimal element tree for scene blocks.
//!
//! Only the attributes the editor cares about are modelled: the id-like
//! attributes that must be unique per page (`id`, `for`, `name`), a class and
//! a text caption.

use serde::{Deserialize, Serialize};

/// One element in a block's subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Label target (`for` / `htmlFor`).
    #[serde(rename = "for", skip_serializing_if = "Option::is_none")]
    pub html_for: Option<String>,
    /// Form-field name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    /// Creates an element with the given tag and no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Builder: Set id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder: Set label target.
    pub fn with_for(mut self, target: impl Into<String>) -> Self {
        self.html_for = Some(target.into());
        self
    }

    /// Builder: Set form-field name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: Set class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Builder: Set text caption.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder: Append a child.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first search for the element with `id`, including `self`.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_id(id))
    }

    /// All elements of the subtree in pre-order, including `self`.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a Element>) {
        out.push(self);
        for child in &self.children {
            child.collect_into(out);
        }
    }

    /// Every id-like attribute value in the subtree.
    pub fn identifiers(&self) -> Vec<&str> {
        self.descendants()
            .into_iter()
            .flat_map(|e| [&e.id, &e.html_for, &e.name])
            .filter_map(|v| v.as_deref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("div").with_id("outer").with_child(
            Element::new("form").with_child(
                Element::new("textarea")
                    .with_id("inner")
                    .with_name("inner"),
            ),
        )
    }

    #[test]
    fn test_find_by_id_reaches_nested() {
        let root = sample();
        assert_eq!(root.find_by_id("inner").unwrap().tag, "textarea");
        assert_eq!(root.find_by_id("outer").unwrap().tag, "div");
        assert!(root.find_by_id("missing").is_none());
    }

    #[test]
    fn test_descendants_preorder() {
        let tags: Vec<_> = sample()
            .descendants()
            .iter()
            .map(|e| e.tag.clone())
            .collect();
        assert_eq!(tags, vec!["div", "form", "textarea"]);
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(sample().identifiers(), vec!["outer", "inner", "inner"]);
    }

    #[test]
    fn test_serialize_uses_for_attribute() {
        let label = Element::new("label").with_for("json-0");
        let value = serde_json::to_value(&label).unwrap();
        assert_eq!(value, serde_json::json!({"tag": "label", "for": "json-0"}));
    }
}
