use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::keywords::KeywordEntry;

/// A metadata field together with its length in characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldText {
    pub content: String,
    pub length: usize,
}

impl FieldText {
    /// Wraps a field value, counting characters rather than bytes
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let length = content.chars().count();
        FieldText { content, length }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Heading levels h1 through h6, ordered
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    pub const ALL: [HeadingLevel; 6] = [
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
        HeadingLevel::H5,
        HeadingLevel::H6,
    ];

    /// The tag name for this level
    pub fn tag(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
            HeadingLevel::H5 => "h5",
            HeadingLevel::H6 => "h6",
        }
    }

    /// Parses a tag name, ignoring ASCII case
    pub fn from_tag(tag: &str) -> Option<Self> {
        HeadingLevel::ALL
            .into_iter()
            .find(|level| level.tag().eq_ignore_ascii_case(tag))
    }
}

/// One heading with its vertical position on the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub text: String,
    /// Viewport-relative top at capture time, 0.0 when unknown
    pub position: f64,
}

/// Alt-text state of one image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub has_alt: bool,
    pub alt: String,
}

/// Link totals split by destination host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCounts {
    pub total: usize,
    pub internal: usize,
    pub external: usize,
}

/// Everything the extractor reads off one captured page.
///
/// Every heading level is present in the map, empty or not, so consumers
/// can index without probing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub title: FieldText,
    pub description: FieldText,
    pub headings: BTreeMap<HeadingLevel, Vec<Heading>>,
    pub images: Vec<ImageInfo>,
    pub links: LinkCounts,
    pub word_count: usize,
    pub keywords: Vec<KeywordEntry>,
}
