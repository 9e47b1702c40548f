//! Error types for tool operations

use crate::error::AskError;

/// Error type for tool operations
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Invalid arguments provided to the tool
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Tool execution failed
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// Tool not found
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Tool timeout
    #[error("Tool execution timeout")]
    Timeout,

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Cancelled
    #[error("Tool execution cancelled")]
    Cancelled,

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

impl crate::error::UnifiedError for ToolError {
    fn error_code(&self) -> &str {
        match self {
            ToolError::InvalidArguments(_) => "TOOL_INVALID_ARGS",
            ToolError::ExecutionFailed(_) => "TOOL_EXEC_FAILED",
            ToolError::NotFound(_) => "TOOL_NOT_FOUND",
            ToolError::Timeout => "TOOL_TIMEOUT",
            ToolError::Json(_) => "TOOL_JSON_ERROR",
            ToolError::Cancelled => "TOOL_CANCELLED",
            ToolError::Other(_) => "TOOL_OTHER",
        }
    }

    fn message(&self) -> &str {
        match self {
            ToolError::InvalidArguments(msg) => msg,
            ToolError::ExecutionFailed(msg) => msg,
            ToolError::NotFound(name) => name,
            ToolError::Timeout => "Tool execution timeout",
            ToolError::Json(_) => "JSON error occurred",
            ToolError::Cancelled => "Tool execution cancelled",
            ToolError::Other(msg) => msg,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, ToolError::Timeout)
    }
}

impl From<AskError> for ToolError {
    fn from(err: AskError) -> Self {
        match err {
            AskError::InvalidInput { message, .. } => ToolError::InvalidArguments(message),
            AskError::NotFound { message, .. } => ToolError::NotFound(message),
            AskError::Timeout { .. } => ToolError::Timeout,
            other => ToolError::ExecutionFailed(other.to_string()),
        }
    }
}

impl From<ToolError> for AskError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::InvalidArguments(msg) => AskError::invalid_input(msg),
            ToolError::NotFound(name) => {
                AskError::not_found_resource(format!("Tool not found: {}", name), "tool")
            }
            ToolError::Json(err) => AskError::json(err.to_string()),
            ToolError::Timeout => AskError::tool("unknown", "Tool execution timeout"),
            ToolError::Cancelled => AskError::tool("unknown", "Cancelled"),
            ToolError::ExecutionFailed(msg) | ToolError::Other(msg) => {
                AskError::tool("unknown", msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UnifiedError;

    #[test]
    fn test_tool_error_codes() {
        assert_eq!(
            ToolError::InvalidArguments("x".into()).error_code(),
            "TOOL_INVALID_ARGS"
        );
        assert_eq!(ToolError::Timeout.error_code(), "TOOL_TIMEOUT");
        assert!(ToolError::Timeout.is_retryable());
        assert!(!ToolError::Cancelled.is_retryable());
    }

    #[test]
    fn test_ask_error_round_trip_keeps_invalid_input() {
        let tool_err: ToolError = AskError::invalid_input("too many questions").into();
        assert!(matches!(tool_err, ToolError::InvalidArguments(ref m) if m == "too many questions"));

        let back: AskError = tool_err.into();
        assert!(matches!(back, AskError::InvalidInput { .. }));
    }
}
