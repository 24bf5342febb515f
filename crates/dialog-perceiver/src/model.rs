//! DOM-lite node model.
//!
//! The engine never touches a live DOM; host adapters hand it value
//! snapshots of dialog subtrees. Serde derives let tests express fixtures
//! as JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DomNode {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DomNode>,
}

impl DomNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: DomNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Depth-first search over descendants, excluding `self` (the same
    /// scope a `querySelector` call on this element would cover).
    pub fn find<F>(&self, pred: &F) -> Option<&DomNode>
    where
        F: Fn(&DomNode) -> bool,
    {
        for child in &self.children {
            if pred(child) {
                return Some(child);
            }
            if let Some(found) = child.find(pred) {
                return Some(found);
            }
        }
        None
    }

    pub fn find_class(&self, class: &str) -> Option<&DomNode> {
        self.find(&|n| n.has_class(class))
    }

    /// First descendant in tree order carrying any of the given classes.
    pub fn find_any_class(&self, classes: &[&str]) -> Option<&DomNode> {
        self.find(&|n| classes.iter().any(|c| n.has_class(c)))
    }

    pub fn find_class_containing(&self, fragment: &str) -> Option<&DomNode> {
        self.find(&|n| n.classes.iter().any(|c| c.contains(fragment)))
    }

    pub fn find_tag(&self, tag: &str) -> Option<&DomNode> {
        self.find(&|n| n.tag.eq_ignore_ascii_case(tag))
    }

    /// Own text plus descendant text, whitespace-joined.
    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&|_| false, &mut parts);
        parts.join(" ")
    }

    /// Like [`text_content`](Self::text_content), skipping subtrees the
    /// predicate matches.
    pub fn text_excluding<F>(&self, skip: &F) -> String
    where
        F: Fn(&DomNode) -> bool,
    {
        let mut parts = Vec::new();
        self.collect_text(skip, &mut parts);
        parts.join(" ")
    }

    fn collect_text<F>(&self, skip: &F, parts: &mut Vec<String>)
    where
        F: Fn(&DomNode) -> bool,
    {
        if let Some(text) = &self.text {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_string());
            }
        }
        for child in &self.children {
            if skip(child) {
                continue;
            }
            child.collect_text(skip, parts);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialog() -> DomNode {
        DomNode::new("div").with_class("mat-dialog-container").with_child(
            DomNode::new("div").with_class("item-title").with_text("Arpillera 10oz").with_child(
                DomNode::new("span").with_class("item-code").with_text("Code: 90210"),
            ),
        )
    }

    #[test]
    fn find_is_depth_first_and_excludes_self() {
        let root = dialog();
        assert!(root.find_class("mat-dialog-container").is_none());
        assert!(root.find_class("item-title").is_some());
        assert!(root.find_class("item-code").is_some());
    }

    #[test]
    fn text_content_joins_descendants() {
        let root = dialog();
        assert_eq!(root.text_content(), "Arpillera 10oz Code: 90210");
    }

    #[test]
    fn text_excluding_skips_subtrees() {
        let title = dialog();
        let text = title.text_excluding(&|n| n.has_class("item-code"));
        assert_eq!(text, "Arpillera 10oz");
    }

    #[test]
    fn nodes_deserialize_from_json_fixtures() {
        let node: DomNode = serde_json::from_str(
            r#"{
                "tag": "div",
                "classes": ["cdk-overlay-pane"],
                "children": [{"tag": "h1", "text": "Cinta"}]
            }"#,
        )
        .unwrap();
        assert_eq!(node.find_tag("h1").unwrap().text_content(), "Cinta");
    }
}
