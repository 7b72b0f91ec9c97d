use crate::browser::{ConnectionOptions, LaunchOptions, PageSession};
use crate::error::Result as LensResult;
use rmcp::{
    handler::server::router::tool::ToolRouter,
    model::{Implementation, ServerCapabilities, ServerInfo},
    tool_handler, ServerHandler,
};
use std::sync::Arc;

/// MCP server exposing the page analysis and highlight tools.
///
/// Owns one browser session shared by every request; highlight state lives
/// in the session, so concurrent clients see the same single active
/// keyword.
#[derive(Clone)]
pub struct LensServer {
    session: Arc<PageSession>,
    tool_router: ToolRouter<Self>,
}

impl LensServer {
    /// Launch a browser with the given options and serve tools against it
    pub fn with_options(options: LaunchOptions) -> LensResult<Self> {
        Ok(Self {
            session: Arc::new(PageSession::launch(options)?),
            tool_router: Self::tool_router(),
        })
    }

    /// Launch a browser with default options
    pub fn new() -> LensResult<Self> {
        Self::with_options(LaunchOptions::default())
    }

    /// Attach to an already-running browser instead of launching one
    pub fn connect(options: ConnectionOptions) -> LensResult<Self> {
        Ok(Self {
            session: Arc::new(PageSession::connect(options)?),
            tool_router: Self::tool_router(),
        })
    }

    /// The shared browser session
    pub fn session(&self) -> Arc<PageSession> {
        self.session.clone()
    }
}

#[tool_handler]
impl ServerHandler for LensServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Page analysis and keyword highlighting over a live browser. \
                 Use page_navigate to open a URL, page_analyze to extract the \
                 page's signals (title, description, headings, images, links, \
                 keywords), page_highlight to mark a keyword's occurrences, and \
                 page_clear_highlights to restore the original text."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}
