use crate::error::{LensError, Result};
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the highlight tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HighlightParams {
    /// Keyword to highlight, matched case-insensitively as literal text
    pub keyword: String,
}

/// Tool that highlights every occurrence of a keyword on the page.
///
/// Only one keyword can be highlighted at a time; applying a new one
/// replaces the previous highlight. Zero matches is a success with
/// `match_count` 0, while an empty keyword is reported as a failed result
/// without touching the page.
#[derive(Default)]
pub struct HighlightTool;

impl Tool for HighlightTool {
    type Params = HighlightParams;

    fn name(&self) -> &str {
        "highlight"
    }

    fn execute_typed(
        &self,
        params: HighlightParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let outcome = match context.session.highlight(&params.keyword) {
            Ok(outcome) => outcome,
            Err(LensError::MalformedKeyword(reason)) => {
                return Ok(ToolResult::failure(reason));
            }
            Err(e) => return Err(e),
        };
        context.invalidate();

        Ok(ToolResult::success_with(serde_json::json!({
            "keyword": params.keyword,
            "match_count": outcome.match_count,
            "active_keyword": outcome.active_keyword
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_params() {
        let json = serde_json::json!({
            "keyword": "rust"
        });

        let params: HighlightParams = serde_json::from_value(json).unwrap();
        assert_eq!(params.keyword, "rust");
    }

    #[test]
    fn test_highlight_params_require_keyword() {
        let result: std::result::Result<HighlightParams, _> =
            serde_json::from_value(serde_json::json!({}));
        assert!(result.is_err());
    }

    #[test]
    fn test_highlight_tool_metadata() {
        let tool = HighlightTool;
        assert_eq!(tool.name(), "highlight");
        let schema = tool.parameters_schema();
        assert!(schema.is_object());
    }
}
