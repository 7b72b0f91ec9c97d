//! MCP (Model Context Protocol) server implementation for page analysis
//!
//! This module provides rmcp-compatible tools by wrapping the existing tool
//! implementations.

pub mod handler;
pub use handler::LensServer;

use crate::tools::{ToolContext, ToolResult as InternalToolResult};
use rmcp::{
    tool_router, tool,
    ErrorData as McpError,
    model::{CallToolResult, Content},
    handler::server::wrapper::Parameters,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Navigate tool parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NavigateParams {
    /// URL to navigate to
    pub url: String,
    /// Wait for navigation to complete (default: true)
    #[serde(default = "default_true")]
    pub wait_for_load: bool,
}

/// Analyze tool parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeParams {
    /// Maximum number of ranked keywords to return (default: 15)
    #[serde(default)]
    pub top_n: Option<usize>,
    /// Minimum keyword length in characters (default: 4)
    #[serde(default)]
    pub min_length: Option<usize>,
}

/// Highlight tool parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HighlightParams {
    /// Keyword to highlight, matched case-insensitively as literal text
    pub keyword: String,
}

/// Clear-highlights tool parameters (none)
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ClearParams {}

fn default_true() -> bool {
    true
}

/// Convert internal ToolResult to MCP CallToolResult
fn convert_result(result: InternalToolResult) -> Result<CallToolResult, McpError> {
    if result.success {
        let text = if let Some(data) = result.data {
            serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string())
        } else {
            "Success".to_string()
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    } else {
        let error_msg = result.error.unwrap_or_else(|| "Unknown error".to_string());
        Err(McpError::internal_error(error_msg, None))
    }
}

#[tool_router]
impl LensServer {
    /// Navigate to a URL
    #[tool(description = "Navigate to a specified URL in the browser")]
    fn page_navigate(
        &self,
        params: Parameters<NavigateParams>,
    ) -> Result<CallToolResult, McpError> {
        let session = self.session();
        let mut context = ToolContext::new(&*session);

        let tool_params = serde_json::json!({
            "url": params.0.url,
            "wait_for_load": params.0.wait_for_load
        });

        let result = session.tool_registry()
            .execute("navigate", tool_params, &mut context)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        convert_result(result)
    }

    /// Extract the page's signal snapshot
    #[tool(description = "Analyze the current page: title, description, headings, \
                          image alt coverage, link split, word count, and top keywords")]
    fn page_analyze(
        &self,
        params: Parameters<AnalyzeParams>,
    ) -> Result<CallToolResult, McpError> {
        let session = self.session();
        let mut context = ToolContext::new(&*session);

        let tool_params = serde_json::json!({
            "top_n": params.0.top_n,
            "min_length": params.0.min_length
        });

        let result = session.tool_registry()
            .execute("analyze", tool_params, &mut context)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        convert_result(result)
    }

    /// Highlight a keyword on the page
    #[tool(description = "Highlight every occurrence of a keyword on the current page. \
                          Only one keyword is highlighted at a time; a new keyword replaces \
                          the previous highlight")]
    fn page_highlight(
        &self,
        params: Parameters<HighlightParams>,
    ) -> Result<CallToolResult, McpError> {
        let session = self.session();
        let mut context = ToolContext::new(&*session);

        let tool_params = serde_json::json!({
            "keyword": params.0.keyword
        });

        let result = session.tool_registry()
            .execute("highlight", tool_params, &mut context)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        convert_result(result)
    }

    /// Remove all highlights
    #[tool(description = "Remove every keyword highlight and restore the page text exactly")]
    fn page_clear_highlights(
        &self,
        params: Parameters<ClearParams>,
    ) -> Result<CallToolResult, McpError> {
        let _ = params;
        let session = self.session();
        let mut context = ToolContext::new(&*session);

        let result = session.tool_registry()
            .execute("clear_highlights", serde_json::json!({}), &mut context)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        convert_result(result)
    }
}
