//! Document model for captured pages
//!
//! This module provides the in-memory representation of a captured page and
//! the pieces everything else is built on:
//! - DomNode / NodePath: the body tree and stable node addresses
//! - PageDocument: metadata plus body, with node splicing and mark removal
//! - text walker: visible text nodes in document order
//!
//! Trees arrive as JSON from the page-side capture script; every extraction
//! and highlight operation works on this model rather than on live DOM
//! handles.

pub mod document;
pub mod node;
pub mod walker;

pub use document::PageDocument;
pub use node::{DomNode, NodePath};
pub use walker::{default_skip, text_nodes, text_nodes_filtered, TextNodeRef, TextNodes};

/// Class carried by every highlight span. The walker treats elements with
/// this class as already-consumed text, and removal targets them by it.
pub const MARK_CLASS: &str = "keyword-highlight";
