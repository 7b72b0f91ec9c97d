//! Reversible keyword highlighting
//!
//! This module provides the highlight engine:
//! - Segment / split_segments: case-insensitive matching in one text node
//! - MarkPlan / plan_marks: splice ops for a whole captured page
//! - DocumentView: the seam between planning and whatever holds the page
//! - Highlighter: at most one active keyword, apply and remove
//!
//! Plans are built against a captured tree and applied in one shot. An
//! applier must verify every op before mutating anything, so a page that
//! changed underneath reports `TargetUnavailable` and stays untouched.

pub mod plan;
pub mod splice;

pub use plan::{plan_marks, validate_keyword, MarkPlan, SpliceOp};
pub use splice::{split_segments, Segment};

use serde::{Deserialize, Serialize};

use crate::dom::{DomNode, PageDocument, MARK_CLASS};
use crate::error::{LensError, Result};

/// A document that can be captured, marked, and cleared.
///
/// `PageDocument` implements this for in-memory trees; the browser session
/// implements it for live tabs. The highlighter drives both the same way.
pub trait DocumentView {
    /// Snapshot of the current document
    fn capture(&self) -> Result<PageDocument>;

    /// Applies a full plan. Either every op applies or none does.
    fn apply_marks(&mut self, plan: &MarkPlan) -> Result<()>;

    /// Removes every mark, restoring the text each one wrapped.
    /// Returns how many marks were removed.
    fn clear_marks(&mut self) -> Result<usize>;

    /// Brings the first mark into view
    fn reveal_first_mark(&mut self) -> Result<()>;
}

impl DocumentView for PageDocument {
    fn capture(&self) -> Result<PageDocument> {
        Ok(self.clone())
    }

    fn apply_marks(&mut self, plan: &MarkPlan) -> Result<()> {
        // Validate every op against the unmodified tree before the first
        // splice, so a stale plan leaves the document exactly as it was.
        for op in &plan.ops {
            let node = self.resolve(&op.path).ok_or_else(|| {
                LensError::TargetUnavailable(format!("no node at {}", op.path))
            })?;
            match node.as_text() {
                Some(text) if text == op.expect => {}
                Some(_) => {
                    return Err(LensError::TargetUnavailable(format!(
                        "text changed at {}",
                        op.path
                    )));
                }
                None => {
                    return Err(LensError::TargetUnavailable(format!(
                        "no text node at {}",
                        op.path
                    )));
                }
            }
        }

        // Back to front: splicing a node only shifts paths that come after
        // it in document order, so every op still to apply stays valid.
        for op in plan.ops.iter().rev() {
            self.splice_node(&op.path, segment_nodes(&op.segments))?;
        }
        Ok(())
    }

    fn clear_marks(&mut self) -> Result<usize> {
        Ok(self.unwrap_marks())
    }

    fn reveal_first_mark(&mut self) -> Result<()> {
        // nothing to scroll in an in-memory tree
        Ok(())
    }
}

fn segment_nodes(segments: &[Segment]) -> Vec<DomNode> {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Plain(text) => DomNode::text(text.clone()),
            Segment::Mark(text) => DomNode::element("span")
                .with_attribute("class", MARK_CLASS)
                .add_child(DomNode::text(text.clone())),
        })
        .collect()
}

/// Result of a highlight or removal operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightOutcome {
    /// Occurrences marked by this operation
    pub match_count: usize,
    /// Keyword left active on the page, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_keyword: Option<String>,
}

/// Tracks the single keyword allowed to be highlighted at a time.
///
/// Applying a keyword always clears existing marks first, then plans
/// against the cleaned page, so switching keywords or re-applying the same
/// one never nests or duplicates marks.
#[derive(Debug, Default)]
pub struct Highlighter {
    active: Option<String>,
}

impl Highlighter {
    pub fn new() -> Self {
        Highlighter { active: None }
    }

    /// The keyword currently highlighted, if any
    pub fn active_keyword(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Highlights every occurrence of `keyword`, replacing any previous
    /// highlight.
    ///
    /// A malformed keyword is rejected before the page is touched. A
    /// keyword with no occurrences still clears the previous highlight and
    /// reports zero matches with no active keyword.
    pub fn apply<V: DocumentView>(&mut self, view: &mut V, keyword: &str) -> Result<HighlightOutcome> {
        let keyword = validate_keyword(keyword)?.to_string();

        view.clear_marks()?;
        self.active = None;

        let document = view.capture()?;
        let plan = plan_marks(&document, &keyword)?;
        if plan.is_empty() {
            return Ok(HighlightOutcome {
                match_count: 0,
                active_keyword: None,
            });
        }

        view.apply_marks(&plan)?;
        view.reveal_first_mark()?;
        self.active = Some(plan.keyword.clone());
        Ok(HighlightOutcome {
            match_count: plan.match_count,
            active_keyword: self.active.clone(),
        })
    }

    /// Removes the active highlight. `match_count` reports how many marks
    /// came off; `active_keyword` is always `None` afterwards.
    pub fn remove<V: DocumentView>(&mut self, view: &mut V) -> Result<HighlightOutcome> {
        let removed = view.clear_marks()?;
        self.active = None;
        Ok(HighlightOutcome {
            match_count: removed,
            active_keyword: None,
        })
    }
}
