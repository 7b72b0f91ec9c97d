use thiserror::Error;

/// Errors produced by page-lens operations
#[derive(Debug, Error)]
pub enum LensError {
    /// Failed to launch a browser instance
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Failed to connect to an existing browser instance
    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    /// Navigation to a URL failed or timed out
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// A tab-level operation (enumerate, activate, close) failed
    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    /// The document or its execution context is gone or changed mid-operation
    #[error("Target unavailable: {0}")]
    TargetUnavailable(String),

    /// The page capture payload was missing or malformed
    #[error("Failed to capture page: {0}")]
    CaptureFailed(String),

    /// An empty or whitespace-only keyword was supplied to a highlight operation
    #[error("Malformed keyword: {0}")]
    MalformedKeyword(String),

    /// No tool is registered under the requested name
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool parameters did not deserialize into the tool's parameter type
    #[error("Invalid tool parameters: {0}")]
    InvalidParams(String),

    /// A tool started executing and failed
    #[error("Tool '{tool}' failed: {reason}")]
    ToolExecutionFailed { tool: String, reason: String },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LensError::TargetUnavailable("tab closed".to_string());
        assert_eq!(err.to_string(), "Target unavailable: tab closed");

        let err = LensError::ToolExecutionFailed {
            tool: "highlight".to_string(),
            reason: "lock poisoned".to_string(),
        };
        assert_eq!(err.to_string(), "Tool 'highlight' failed: lock poisoned");
    }

    #[test]
    fn test_malformed_keyword_display() {
        let err = LensError::MalformedKeyword("keyword is empty".to_string());
        assert!(err.to_string().starts_with("Malformed keyword"));
    }
}
