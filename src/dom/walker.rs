use crate::dom::node::{DomNode, NodePath};
use crate::dom::MARK_CLASS;

/// Tags whose text never renders and is never matched or counted
const SKIP_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

/// A text node found during a walk, addressed by its path from the body
#[derive(Debug, Clone, PartialEq)]
pub struct TextNodeRef<'a> {
    pub path: NodePath,
    pub text: &'a str,
}

/// Depth-first iterator over the text nodes of a tree.
///
/// Elements matching the skip predicate are pruned whole: neither their
/// text nor their descendants' text is yielded.
pub struct TextNodes<'a, F> {
    stack: Vec<(&'a DomNode, NodePath)>,
    skip: F,
}

impl<'a, F> Iterator for TextNodes<'a, F>
where
    F: Fn(&DomNode) -> bool,
{
    type Item = TextNodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, path)) = self.stack.pop() {
            match node {
                DomNode::Text { text } => return Some(TextNodeRef { path, text }),
                DomNode::Element { children, .. } => {
                    if (self.skip)(node) {
                        continue;
                    }
                    for (index, child) in children.iter().enumerate().rev() {
                        self.stack.push((child, path.child(index)));
                    }
                }
            }
        }
        None
    }
}

/// True for containers whose text never renders
pub(crate) fn non_rendering(node: &DomNode) -> bool {
    SKIP_TAGS.iter().any(|tag| node.is_tag(tag))
}

/// Default skip rule: non-rendered containers and already-placed highlight
/// marks
pub fn default_skip(node: &DomNode) -> bool {
    non_rendering(node) || node.has_class(MARK_CLASS)
}

/// Walks the visible text nodes under `root`, skipping script, style,
/// noscript, and template subtrees along with existing highlight marks.
/// Paths are relative to `root`.
pub fn text_nodes(root: &DomNode) -> TextNodes<'_, fn(&DomNode) -> bool> {
    text_nodes_filtered(root, default_skip)
}

/// Walks text nodes with a caller-supplied skip predicate
pub fn text_nodes_filtered<F>(root: &DomNode, skip: F) -> TextNodes<'_, F>
where
    F: Fn(&DomNode) -> bool,
{
    TextNodes {
        stack: vec![(root, NodePath::root())],
        skip,
    }
}
