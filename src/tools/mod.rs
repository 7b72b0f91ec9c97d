//! Typed page inspection and highlight tools
//!
//! Each tool declares a parameter type that deserializes from JSON and
//! carries a schema for MCP clients. The registry stores tools type-erased
//! so callers (the MCP server, the CLI, library users) can execute them by
//! name with a JSON value:
//! - navigate: open a URL in the active tab
//! - analyze: capture the page and extract its signal snapshot
//! - highlight: mark every occurrence of a keyword
//! - clear_highlights: remove all marks and restore the text

pub mod analyze;
pub mod clear;
pub mod highlight;
pub mod navigate;

pub use analyze::AnalyzeTool;
pub use clear::ClearHighlightsTool;
pub use highlight::HighlightTool;
pub use navigate::NavigateTool;

use crate::browser::PageSession;
use crate::dom::PageDocument;
use crate::error::{LensError, Result};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Result of one tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,

    /// Payload on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Reason on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    /// A successful result with no payload
    pub fn success() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    /// A successful result carrying a JSON payload
    pub fn success_with(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// A failed result with a reason
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Execution context handed to tools: the session plus a per-request
/// document cache, so tools sharing one request do not capture twice
pub struct ToolContext<'a> {
    pub session: &'a PageSession,
    cached: Option<PageDocument>,
}

impl<'a> ToolContext<'a> {
    pub fn new(session: &'a PageSession) -> Self {
        Self {
            session,
            cached: None,
        }
    }

    /// The captured document, capturing on first use
    pub fn document(&mut self) -> Result<&PageDocument> {
        if self.cached.is_none() {
            self.cached = Some(self.session.capture()?);
        }
        self.cached
            .as_ref()
            .ok_or_else(|| LensError::CaptureFailed("page capture produced nothing".to_string()))
    }

    /// Drops the cached capture; the next `document()` call re-captures.
    /// Tools that mutate the page call this after the mutation.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

/// A typed page tool
pub trait Tool {
    /// Parameter type, deserialized from incoming JSON
    type Params: DeserializeOwned + JsonSchema;

    /// Name the tool is registered and executed under
    fn name(&self) -> &str;

    /// Execute with already-typed parameters
    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext) -> Result<ToolResult>;

    /// JSON schema describing the parameter type
    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or_default()
    }
}

/// Object-safe layer over `Tool` so the registry can hold mixed tools
trait ErasedTool {
    fn name(&self) -> &str;
    fn parameters_schema(&self) -> serde_json::Value;
    fn execute_value(
        &self,
        params: serde_json::Value,
        context: &mut ToolContext,
    ) -> Result<ToolResult>;
}

impl<T: Tool> ErasedTool for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn parameters_schema(&self) -> serde_json::Value {
        Tool::parameters_schema(self)
    }

    fn execute_value(
        &self,
        params: serde_json::Value,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let typed: T::Params = serde_json::from_value(params)
            .map_err(|e| LensError::InvalidParams(format!("{}: {}", Tool::name(self), e)))?;
        self.execute_typed(typed, context)
    }
}

/// Registry of executable tools, keyed by name in registration order
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn ErasedTool + Send + Sync>>,
}

impl ToolRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in tool set
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NavigateTool);
        registry.register(AnalyzeTool);
        registry.register(HighlightTool);
        registry.register(ClearHighlightsTool);
        registry
    }

    /// Registers a tool, replacing any previous tool with the same name
    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + Send + Sync + 'static,
    {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    /// Executes a registered tool with JSON parameters
    pub fn execute(
        &self,
        name: &str,
        params: serde_json::Value,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| LensError::ToolNotFound(name.to_string()))?;
        tool.execute_value(params, context)
    }

    /// Parameter schema of a registered tool
    pub fn schema(&self, name: &str) -> Option<serde_json::Value> {
        self.tools.get(name).map(|tool| tool.parameters_schema())
    }

    /// Tool names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
