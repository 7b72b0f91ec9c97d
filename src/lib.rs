//! # page-lens
//!
//! A Rust library for extracting page signals and reversibly highlighting keywords
//! on live pages via Chrome DevTools Protocol (CDP), designed for AI agent integration.
//!
//! ## Features
//!
//! - **MCP Server**: Model Context Protocol server for AI-driven page analysis
//! - **Browser Session Management**: Launch or connect to Chrome/Chromium instances
//! - **Signal Extraction**: Capture title, meta description, headings, images, links,
//!   and word/keyword frequencies from the rendered page
//! - **Keyword Ranking**: Stopword-filtered frequency ranking with stable ordering
//! - **Reversible Highlighting**: Wrap every occurrence of a keyword in a visual
//!   marker and restore the exact original text on removal
//!
//! ## MCP Server
//!
//! The recommended way to use this library is via the Model Context Protocol (MCP)
//! server, which exposes the analyzer and highlighter to AI agents like Claude:
//!
//! ### Running the MCP Server
//!
//! ```bash
//! # Run headless browser
//! cargo run --bin mcp-server
//!
//! # Run with visible browser (useful for debugging)
//! cargo run --bin mcp-server -- --headed
//! ```
//!
//! There is also a standalone CLI for one-shot analysis from the terminal:
//!
//! ```bash
//! cargo run --bin page-lens -- https://example.com --highlight example
//! ```
//!
//! ## Library Usage (Advanced)
//!
//! For direct integration in Rust applications:
//!
//! ### Analyzing a Live Page
//!
//! ```rust,no_run
//! use page_lens::{LaunchOptions, PageSession};
//!
//! # fn main() -> page_lens::Result<()> {
//! // Launch a browser
//! let session = PageSession::launch(LaunchOptions::default())?;
//!
//! // Navigate and wait for the page to settle
//! session.navigate("https://example.com")?;
//! session.wait_for_navigation()?;
//!
//! // Extract the signal snapshot
//! let snapshot = session.analyze()?;
//! println!("Top keyword: {:?}", snapshot.keywords.first());
//!
//! // Highlight a keyword on the live page, then undo it
//! let outcome = session.highlight("example")?;
//! println!("Highlighted {} occurrences", outcome.match_count);
//! session.clear_highlights()?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Using the Tool System
//!
//! ```rust,no_run
//! use page_lens::{LaunchOptions, PageSession};
//! use page_lens::tools::{ToolContext, ToolRegistry};
//! use serde_json::json;
//!
//! # fn main() -> page_lens::Result<()> {
//! let session = PageSession::launch(LaunchOptions::default())?;
//! let registry = ToolRegistry::with_defaults();
//! let mut context = ToolContext::new(&session);
//!
//! // Navigate using the tool system
//! registry.execute("navigate", json!({"url": "https://example.com"}), &mut context)?;
//!
//! // Highlight a keyword
//! registry.execute("highlight", json!({"keyword": "example"}), &mut context)?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Highlighting In Memory
//!
//! The highlight engine also works directly on captured documents, with no
//! browser attached. Removing a highlight restores the text exactly:
//!
//! ```rust
//! use page_lens::dom::{DomNode, PageDocument};
//! use page_lens::highlight::Highlighter;
//!
//! # fn main() -> page_lens::Result<()> {
//! let body = DomNode::element("body")
//!     .add_child(DomNode::text("Rust is fast. rust is safe."));
//! let mut document = PageDocument::new("https://example.com/", body);
//! let before = document.text_content();
//!
//! let mut highlighter = Highlighter::new();
//! let outcome = highlighter.apply(&mut document, "rust")?;
//! assert_eq!(outcome.match_count, 2);
//!
//! highlighter.remove(&mut document)?;
//! assert_eq!(document.text_content(), before);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: Browser session management and page capture over CDP
//! - [`dom`]: Captured document tree, node paths, and text-node traversal
//! - [`snapshot`]: Signal extraction into a [`PageSnapshot`]
//! - [`keywords`]: Tokenizing, stopword filtering, and frequency ranking
//! - [`highlight`]: Reversible keyword highlighting with exact text restoration
//! - [`tools`]: Typed page tools (navigate, analyze, highlight, clear_highlights)
//! - [`error`]: Error types and result aliases
//! - [`mcp`]: **Model Context Protocol server** (requires `mcp-handler` feature) - **Start here for AI integration**

pub mod browser;
pub mod dom;
pub mod error;
pub mod highlight;
pub mod keywords;
pub mod snapshot;
pub mod tools;

#[cfg(feature = "mcp-handler")]
pub mod mcp;

pub use browser::{ConnectionOptions, LaunchOptions, PageSession};
pub use dom::{DomNode, NodePath, PageDocument};
pub use error::{LensError, Result};
pub use highlight::{DocumentView, HighlightOutcome, Highlighter};
pub use keywords::{KeywordEntry, RankOptions, Stopwords};
pub use snapshot::PageSnapshot;
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};

#[cfg(feature = "mcp-handler")]
pub use mcp::LensServer;
#[cfg(feature = "mcp-handler")]
pub use rmcp::ServiceExt;
