//! Core Tool trait definition

use super::error::ToolError;
use super::types::{ToolCall, ToolResult, ToolSchema};
use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Base trait for all tools served over `tools/call`
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool's unique name (e.g., "ask_user")
    fn name(&self) -> &str;

    /// Get the tool's description shown to MCP clients
    fn description(&self) -> &str;

    /// Get the tool's JSON schema for input parameters
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with the given arguments
    ///
    /// # Errors
    ///
    /// Returns `ToolError` if arguments are invalid or execution fails.
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError>;

    /// Validate the tool call arguments
    ///
    /// Called before `execute()`. Default implementation accepts all arguments.
    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        let _ = call;
        Ok(())
    }

    /// Maximum execution time, `None` when the tool may legitimately wait on a human
    fn max_execution_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs(300))
    }

    /// Whether this tool blocks until a person responds
    fn requires_user_interaction(&self) -> bool {
        false
    }

    /// Execute the tool with validation, timing and error conversion.
    ///
    /// Always returns a `ToolResult`.
    async fn execute_with_timing(&self, call: &ToolCall) -> ToolResult {
        let start_time = Instant::now();

        if let Err(err) = self.validate(call) {
            return ToolResult::error(&call.id, self.name(), err.to_string())
                .with_execution_time(start_time.elapsed().as_millis() as u64);
        }

        let outcome = match self.max_execution_duration() {
            Some(limit) => match tokio::time::timeout(limit, self.execute(call)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(ToolError::Timeout),
            },
            None => self.execute(call).await,
        };

        match outcome {
            Ok(mut result) => {
                result.execution_time_ms = Some(start_time.elapsed().as_millis() as u64);
                result
            }
            Err(err) => ToolResult::error(&call.id, self.name(), err.to_string())
                .with_execution_time(start_time.elapsed().as_millis() as u64),
        }
    }
}
