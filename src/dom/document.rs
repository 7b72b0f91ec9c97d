use serde::{Deserialize, Serialize};

use crate::dom::node::{DomNode, NodePath};
use crate::dom::walker::non_rendering;
use crate::error::{LensError, Result};

/// Elements that start and end their own line of rendered text
const BLOCK_TAGS: [&str; 35] = [
    "address", "article", "aside", "blockquote", "body", "br", "dd", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "td", "th",
    "tr", "ul",
];

/// A captured page: document metadata plus the body tree.
///
/// This is the unit the capture script ships over the wire and the unit
/// every extraction and highlight operation works against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub body: DomNode,
}

impl PageDocument {
    /// Creates a document with empty title and description
    pub fn new(url: impl Into<String>, body: DomNode) -> Self {
        PageDocument {
            url: url.into(),
            title: String::new(),
            description: String::new(),
            body,
        }
    }

    /// Sets the document title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the meta description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Parses the JSON payload produced by the capture script
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| LensError::CaptureFailed(format!("invalid page payload: {e}")))
    }

    /// Serializes the document back to the capture wire format
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| LensError::CaptureFailed(format!("could not serialize page: {e}")))
    }

    /// Looks up the node at a path, if it still exists
    pub fn resolve(&self, path: &NodePath) -> Option<&DomNode> {
        let mut node = &self.body;
        for &index in path.indices() {
            node = node.children().get(index)?;
        }
        Some(node)
    }

    fn resolve_mut(&mut self, path: &NodePath) -> Option<&mut DomNode> {
        let mut node = &mut self.body;
        for &index in path.indices() {
            node = match node {
                DomNode::Element { children, .. } => children.get_mut(index)?,
                DomNode::Text { .. } => return None,
            };
        }
        Some(node)
    }

    /// Replaces the node at `path` with a run of sibling nodes.
    ///
    /// The body itself cannot be replaced. A path that no longer resolves
    /// means the tree changed under us, reported as `TargetUnavailable`.
    pub fn splice_node(&mut self, path: &NodePath, replacement: Vec<DomNode>) -> Result<()> {
        let (parent_path, index) = path.split_parent().ok_or_else(|| {
            LensError::TargetUnavailable("cannot replace the document body".to_string())
        })?;
        let parent = self
            .resolve_mut(&parent_path)
            .ok_or_else(|| LensError::TargetUnavailable(format!("no node at {parent_path}")))?;
        match parent {
            DomNode::Element { children, .. } if index < children.len() => {
                children.splice(index..=index, replacement);
                Ok(())
            }
            _ => Err(LensError::TargetUnavailable(format!(
                "no child {index} under {parent_path}"
            ))),
        }
    }

    /// Removes every highlight mark, putting each one's text back in place.
    /// Returns the number of marks removed.
    pub fn unwrap_marks(&mut self) -> usize {
        match &mut self.body {
            DomNode::Element { children, .. } => unwrap_in(children),
            DomNode::Text { .. } => 0,
        }
    }

    /// Text of the page as a reader sees it: inline content runs together,
    /// block elements break lines, script/style/noscript/template content
    /// is dropped. Highlight marks are inline, so an active highlight does
    /// not change this value. This is the text the word counter and
    /// keyword ranker consume.
    pub fn visible_text(&self) -> String {
        let mut out = String::new();
        collect_prose(&self.body, &mut out);
        out.trim().to_string()
    }

    /// Exact concatenation of all text in the body, nothing excluded.
    /// Highlighting never changes this value.
    pub fn text_content(&self) -> String {
        self.body.text_content()
    }
}

fn collect_prose(node: &DomNode, out: &mut String) {
    match node {
        DomNode::Text { text } => out.push_str(text),
        DomNode::Element { children, .. } => {
            if non_rendering(node) {
                return;
            }
            let block = BLOCK_TAGS.iter().any(|tag| node.is_tag(tag));
            if block {
                break_line(out);
            }
            for child in children {
                collect_prose(child, out);
            }
            if block {
                break_line(out);
            }
        }
    }
}

fn break_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn unwrap_in(nodes: &mut Vec<DomNode>) -> usize {
    let mut removed = 0;
    let mut replaced_here = false;
    for node in nodes.iter_mut() {
        if node.has_class(crate::dom::MARK_CLASS) {
            *node = DomNode::text(node.text_content());
            removed += 1;
            replaced_here = true;
        } else if let DomNode::Element { children, .. } = node {
            removed += unwrap_in(children);
        }
    }
    if replaced_here {
        coalesce_text(nodes);
    }
    removed
}

/// Merges adjacent text nodes and drops empty ones, the way the page-side
/// removal path normalizes a mark's parent
fn coalesce_text(nodes: &mut Vec<DomNode>) {
    let mut merged: Vec<DomNode> = Vec::with_capacity(nodes.len());
    for node in nodes.drain(..) {
        if let (DomNode::Text { text }, Some(DomNode::Text { text: prev })) =
            (&node, merged.last_mut())
        {
            prev.push_str(text);
            continue;
        }
        merged.push(node);
    }
    merged.retain(|node| node.as_text() != Some(""));
    *nodes = merged;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MARK_CLASS;

    fn sample_document() -> PageDocument {
        let body = DomNode::element("body")
            .add_child(DomNode::element("h1").add_child(DomNode::text("Tea")))
            .add_child(DomNode::element("script").add_child(DomNode::text("ignored();")))
            .add_child(DomNode::element("p").add_child(DomNode::text("green tea leaves")));
        PageDocument::new("https://example.com/", body)
            .with_title("Tea Guide")
            .with_description("All about tea")
    }

    #[test]
    fn test_resolve_paths() {
        let doc = sample_document();
        assert_eq!(doc.resolve(&NodePath::root()).unwrap().tag(), Some("body"));
        let h1_text = doc.resolve(&NodePath::from_indices(vec![0, 0])).unwrap();
        assert_eq!(h1_text.as_text(), Some("Tea"));
        assert!(doc.resolve(&NodePath::from_indices(vec![9])).is_none());
    }

    #[test]
    fn test_splice_replaces_one_node_with_many() {
        let mut doc = sample_document();
        let path = NodePath::from_indices(vec![2, 0]);
        doc.splice_node(
            &path,
            vec![
                DomNode::text("green "),
                DomNode::element("span")
                    .with_attribute("class", MARK_CLASS)
                    .add_child(DomNode::text("tea")),
                DomNode::text(" leaves"),
            ],
        )
        .unwrap();
        let p = doc.resolve(&NodePath::from_indices(vec![2])).unwrap();
        assert_eq!(p.children().len(), 3);
        assert_eq!(doc.text_content(), "Teaignored();green tea leaves");
    }

    #[test]
    fn test_splice_rejects_root_and_stale_paths() {
        let mut doc = sample_document();
        assert!(matches!(
            doc.splice_node(&NodePath::root(), vec![DomNode::text("x")]),
            Err(LensError::TargetUnavailable(_))
        ));
        assert!(matches!(
            doc.splice_node(&NodePath::from_indices(vec![5, 0]), vec![DomNode::text("x")]),
            Err(LensError::TargetUnavailable(_))
        ));
    }

    #[test]
    fn test_unwrap_marks_restores_and_merges_text() {
        let mut doc = sample_document();
        let before = doc.text_content();
        doc.splice_node(
            &NodePath::from_indices(vec![2, 0]),
            vec![
                DomNode::text("green "),
                DomNode::element("span")
                    .with_attribute("class", MARK_CLASS)
                    .add_child(DomNode::text("tea")),
                DomNode::text(" leaves"),
            ],
        )
        .unwrap();
        assert_eq!(doc.unwrap_marks(), 1);
        assert_eq!(doc.text_content(), before);
        // the split text nodes merge back into one
        let p = doc.resolve(&NodePath::from_indices(vec![2])).unwrap();
        assert_eq!(p.children().len(), 1);
        assert_eq!(p.children()[0].as_text(), Some("green tea leaves"));
    }

    #[test]
    fn test_unwrap_marks_on_clean_document_is_a_noop() {
        let mut doc = sample_document();
        let before = doc.clone();
        assert_eq!(doc.unwrap_marks(), 0);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_visible_text_excludes_script_and_breaks_blocks() {
        let doc = sample_document();
        assert_eq!(doc.visible_text(), "Tea\ngreen tea leaves");
    }

    #[test]
    fn test_visible_text_runs_inline_content_together() {
        let body = DomNode::element("body").add_child(
            DomNode::element("p")
                .add_child(DomNode::text("foo"))
                .add_child(DomNode::element("em").add_child(DomNode::text("ba")))
                .add_child(DomNode::text("r")),
        );
        let doc = PageDocument::new("https://example.com/", body);
        assert_eq!(doc.visible_text(), "foobar");
    }

    #[test]
    fn test_visible_text_unchanged_by_marks() {
        let mut doc = sample_document();
        let before = doc.visible_text();
        doc.splice_node(
            &NodePath::from_indices(vec![2, 0]),
            vec![
                DomNode::text("green "),
                DomNode::element("span")
                    .with_attribute("class", MARK_CLASS)
                    .add_child(DomNode::text("tea")),
                DomNode::text(" leaves"),
            ],
        )
        .unwrap();
        assert_eq!(doc.visible_text(), before);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = PageDocument::from_json("not json").unwrap_err();
        assert!(matches!(err, LensError::CaptureFailed(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let doc = sample_document();
        let json = doc.to_json().unwrap();
        assert_eq!(PageDocument::from_json(&json).unwrap(), doc);
    }
}
