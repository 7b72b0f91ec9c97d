use serde::{Deserialize, Serialize};

use crate::dom::{text_nodes, NodePath, PageDocument};
use crate::error::{LensError, Result};
use crate::highlight::splice::{split_segments, Segment};

/// Replacement of one text node by a run of plain and marked segments.
///
/// `expect` is the exact text the node held when the plan was built; an
/// applier must verify it still does before touching anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpliceOp {
    pub path: NodePath,
    pub expect: String,
    pub segments: Vec<Segment>,
}

/// Everything needed to mark one keyword across a captured page.
///
/// Ops are in document order and reference paths in the captured tree, so
/// they must be applied back to front to keep earlier paths valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkPlan {
    pub keyword: String,
    pub ops: Vec<SpliceOp>,
    pub match_count: usize,
}

impl MarkPlan {
    /// True when the keyword occurs nowhere on the page
    pub fn is_empty(&self) -> bool {
        self.match_count == 0
    }
}

/// Rejects empty and whitespace-only keywords, returning the trimmed form
/// used for matching
pub fn validate_keyword(keyword: &str) -> Result<&str> {
    let trimmed = keyword.trim();
    if trimmed.is_empty() {
        return Err(LensError::MalformedKeyword(
            "keyword is empty or whitespace-only".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Walks the page's visible text and builds the splice ops for `keyword`.
///
/// Text inside scripts, styles, and existing marks is never touched. Nodes
/// without an occurrence produce no op. Building a plan performs no
/// mutation at all.
pub fn plan_marks(document: &PageDocument, keyword: &str) -> Result<MarkPlan> {
    let keyword = validate_keyword(keyword)?;
    let mut ops = Vec::new();
    let mut match_count = 0;

    for text_node in text_nodes(&document.body) {
        let segments = split_segments(text_node.text, keyword);
        let marks = segments.iter().filter(|s| s.is_mark()).count();
        if marks == 0 {
            continue;
        }
        match_count += marks;
        ops.push(SpliceOp {
            path: text_node.path,
            expect: text_node.text.to_string(),
            segments,
        });
    }

    Ok(MarkPlan {
        keyword: keyword.to_string(),
        ops,
        match_count,
    })
}
