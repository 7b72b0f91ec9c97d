use crate::error::{LensError, Result};
use crate::keywords::{RankOptions, DEFAULT_MIN_LENGTH, DEFAULT_TOP_N};
use crate::snapshot;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the analyze tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeParams {
    /// Maximum number of ranked keywords to return (default: 15)
    #[serde(default)]
    pub top_n: Option<usize>,

    /// Minimum keyword length in characters (default: 4)
    #[serde(default)]
    pub min_length: Option<usize>,
}

/// Tool that captures the page and extracts its signal snapshot
#[derive(Default)]
pub struct AnalyzeTool;

impl Tool for AnalyzeTool {
    type Params = AnalyzeParams;

    fn name(&self) -> &str {
        "analyze"
    }

    fn execute_typed(
        &self,
        params: AnalyzeParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let options = RankOptions {
            min_length: params.min_length.unwrap_or(DEFAULT_MIN_LENGTH),
            top_n: params.top_n.unwrap_or(DEFAULT_TOP_N),
            ..RankOptions::default()
        };

        let document = context.document()?;
        let snapshot = snapshot::extract_with(document, &options);

        let data = serde_json::to_value(&snapshot).map_err(|e| LensError::ToolExecutionFailed {
            tool: "analyze".to_string(),
            reason: e.to_string(),
        })?;
        Ok(ToolResult::success_with(data))
    }
}
