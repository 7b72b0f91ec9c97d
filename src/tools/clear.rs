use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the clear_highlights tool (none)
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ClearHighlightsParams {}

/// Tool that removes every highlight and restores the original text
#[derive(Default)]
pub struct ClearHighlightsTool;

impl Tool for ClearHighlightsTool {
    type Params = ClearHighlightsParams;

    fn name(&self) -> &str {
        "clear_highlights"
    }

    fn execute_typed(
        &self,
        _params: ClearHighlightsParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let outcome = context.session.clear_highlights()?;
        context.invalidate();

        Ok(ToolResult::success_with(serde_json::json!({
            "removed": outcome.match_count
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_params_accept_empty_object() {
        let params: ClearHighlightsParams =
            serde_json::from_value(serde_json::json!({})).unwrap();
        let _ = params;
    }

    #[test]
    fn test_clear_tool_metadata() {
        let tool = ClearHighlightsTool;
        assert_eq!(tool.name(), "clear_highlights");
        let schema = tool.parameters_schema();
        assert!(schema.is_object());
    }
}
