//! Case-insensitive literal matching within a single text node
//!
//! Matching runs over a lowercase fold of the text while every produced
//! segment slices the original string, so marked text keeps its casing
//! exactly. A fold can change byte lengths (one uppercase char may fold to
//! several chars), so a byte-offset map from folded text back to original
//! characters decides where matches really start and end. A hit that would
//! begin or end inside one original character is rejected.

use serde::{Deserialize, Serialize};

/// One piece of a split text node: untouched text, or a keyword occurrence
/// to wrap in a mark
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Segment {
    Plain(String),
    Mark(String),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain(text) | Segment::Mark(text) => text,
        }
    }

    pub fn is_mark(&self) -> bool {
        matches!(self, Segment::Mark(_))
    }
}

/// Lowercases `text`, recording for each folded byte the byte offset of the
/// original character it came from
fn fold_with_offsets(text: &str) -> (String, Vec<usize>) {
    let mut folded = String::with_capacity(text.len());
    let mut offsets = Vec::with_capacity(text.len());
    for (orig_offset, ch) in text.char_indices() {
        for low in ch.to_lowercase() {
            for _ in 0..low.len_utf8() {
                offsets.push(orig_offset);
            }
            folded.push(low);
        }
    }
    (folded, offsets)
}

/// Splits `text` into plain and marked segments around every occurrence of
/// `keyword`, compared case-insensitively.
///
/// Occurrences are found left to right and never overlap. Concatenating the
/// segments' text always reproduces `text` byte for byte. No empty segment
/// is ever produced; text without a single occurrence comes back as one
/// plain segment.
pub fn split_segments(text: &str, keyword: &str) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }
    let needle = keyword.to_lowercase();
    if needle.is_empty() {
        return vec![Segment::Plain(text.to_string())];
    }

    let (folded, offsets) = fold_with_offsets(text);
    let mut segments = Vec::new();
    let mut last_end = 0; // original bytes
    let mut search_from = 0; // folded bytes

    while let Some(found) = folded[search_from..].find(needle.as_str()) {
        let start = search_from + found;
        let end = start + needle.len();

        // The hit must line up with original character boundaries on both
        // sides, otherwise it lives inside a multi-char fold expansion.
        let starts_char = start == 0 || offsets[start - 1] != offsets[start];
        let ends_char = end == folded.len() || offsets[end] != offsets[end - 1];
        if !(starts_char && ends_char) {
            let step = folded[start..].chars().next().map_or(1, char::len_utf8);
            search_from = start + step;
            continue;
        }

        let orig_start = offsets[start];
        let orig_end = if end == folded.len() {
            text.len()
        } else {
            offsets[end]
        };
        if orig_start > last_end {
            segments.push(Segment::Plain(text[last_end..orig_start].to_string()));
        }
        segments.push(Segment::Mark(text[orig_start..orig_end].to_string()));
        last_end = orig_end;
        search_from = end;
    }

    if last_end < text.len() {
        segments.push(Segment::Plain(text[last_end..].to_string()));
    }
    segments
}
