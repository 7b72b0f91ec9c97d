use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A node in a captured document tree.
///
/// Mirrors the JSON produced by the page-side capture script: element nodes
/// carry their tag, attributes, and children; text nodes carry exact text.
/// Comment, CDATA, and other node kinds are never serialized, so child
/// indices here line up with the capture script's numbering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DomNode {
    Element {
        tag: String,
        #[serde(default)]
        attributes: HashMap<String, String>,
        /// Viewport-relative top of the element, captured for headings only
        #[serde(default, skip_serializing_if = "Option::is_none")]
        top: Option<f64>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<DomNode>,
    },
    Text {
        text: String,
    },
}

impl DomNode {
    /// Creates an element node with no attributes or children
    pub fn element(tag: impl Into<String>) -> Self {
        DomNode::Element {
            tag: tag.into(),
            attributes: HashMap::new(),
            top: None,
            children: Vec::new(),
        }
    }

    /// Creates a text node
    pub fn text(text: impl Into<String>) -> Self {
        DomNode::Text { text: text.into() }
    }

    /// Sets an attribute (no-op on text nodes)
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let DomNode::Element { attributes, .. } = &mut self {
            attributes.insert(name.into(), value.into());
        }
        self
    }

    /// Sets the viewport-relative top position (no-op on text nodes)
    pub fn with_top(mut self, top: f64) -> Self {
        if let DomNode::Element { top: slot, .. } = &mut self {
            *slot = Some(top);
        }
        self
    }

    /// Replaces the children (no-op on text nodes)
    pub fn with_children(mut self, nodes: Vec<DomNode>) -> Self {
        if let DomNode::Element { children, .. } = &mut self {
            *children = nodes;
        }
        self
    }

    /// Appends a child (no-op on text nodes)
    pub fn add_child(mut self, node: DomNode) -> Self {
        if let DomNode::Element { children, .. } = &mut self {
            children.push(node);
        }
        self
    }

    /// Returns the tag name for element nodes
    pub fn tag(&self) -> Option<&str> {
        match self {
            DomNode::Element { tag, .. } => Some(tag),
            DomNode::Text { .. } => None,
        }
    }

    /// Returns an attribute value for element nodes
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            DomNode::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            DomNode::Text { .. } => None,
        }
    }

    /// Viewport-relative top, when the capture recorded one
    pub fn top(&self) -> Option<f64> {
        match self {
            DomNode::Element { top, .. } => *top,
            DomNode::Text { .. } => None,
        }
    }

    /// Checks whether the class attribute contains the given class name
    pub fn has_class(&self, class_name: &str) -> bool {
        self.attribute("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class_name))
            .unwrap_or(false)
    }

    /// Checks the tag name, ignoring ASCII case
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag()
            .map(|t| t.eq_ignore_ascii_case(tag))
            .unwrap_or(false)
    }

    /// Returns the children of an element node, or an empty slice
    pub fn children(&self) -> &[DomNode] {
        match self {
            DomNode::Element { children, .. } => children,
            DomNode::Text { .. } => &[],
        }
    }

    /// Returns the text for text nodes
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DomNode::Text { text } => Some(text),
            DomNode::Element { .. } => None,
        }
    }

    /// Concatenates all text under this node in document order, exactly as
    /// stored, with no separators inserted
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            DomNode::Text { text } => out.push_str(text),
            DomNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Visits this node and every descendant element in document order
    pub fn visit_elements<F: FnMut(&DomNode)>(&self, f: &mut F) {
        if let DomNode::Element { children, .. } = self {
            f(self);
            for child in children {
                child.visit_elements(f);
            }
        }
    }
}

/// Address of a node as child indices from the document body.
///
/// An empty path names the body itself. Paths order the same way the
/// document does: a parent sorts before its descendants, and siblings
/// sort by index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Path of the body node itself
    pub fn root() -> Self {
        NodePath(Vec::new())
    }

    /// Builds a path from explicit child indices
    pub fn from_indices(indices: impl Into<Vec<usize>>) -> Self {
        NodePath(indices.into())
    }

    /// Appends a child index in place
    pub fn push(&mut self, index: usize) {
        self.0.push(index);
    }

    /// Returns the path of the given child
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        NodePath(indices)
    }

    /// Splits into parent path and final index, or None for the root
    pub fn split_parent(&self) -> Option<(NodePath, usize)> {
        let (&last, parent) = self.0.split_last()?;
        Some((NodePath(parent.to_vec()), last))
    }

    /// The raw child indices
    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(root)");
        }
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}
