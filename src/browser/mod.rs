//! Browser session management over the Chrome DevTools Protocol
//!
//! This module owns everything that talks to a real Chrome instance:
//! - LaunchOptions / ConnectionOptions: how a browser is obtained
//! - PageSession: one browser plus the highlight state of its active page
//! - TabView: a live tab driven through the `DocumentView` seam
//!
//! Everything above this module works on captured trees and never sees a
//! CDP connection.

pub mod config;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use session::{PageSession, TabView};
