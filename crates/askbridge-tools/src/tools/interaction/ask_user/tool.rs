//! ask_user tool implementation

use async_trait::async_trait;
use askbridge_core::bridge::QuestionBridge;
use askbridge_core::error::AskError;
use askbridge_core::pending::PendingRequestRegistry;
use askbridge_core::question::AskUserInput;
use askbridge_core::tools::{Tool, ToolCall, ToolError, ToolResult, ToolSchema};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use super::operation::ask_user;
use super::schema::create_schema;

/// Tool that blocks a `tools/call` until the user responds.
///
/// Bad arguments come back as a failed `ToolResult` carrying an unanswered
/// result object, never as a protocol error.
pub struct AskUserTool {
    bridge: Arc<dyn QuestionBridge>,
    registry: PendingRequestRegistry,
}

impl AskUserTool {
    pub fn new(bridge: Arc<dyn QuestionBridge>, registry: PendingRequestRegistry) -> Self {
        Self { bridge, registry }
    }

    pub fn registry(&self) -> &PendingRequestRegistry {
        &self.registry
    }

    fn invalid_arguments(&self, call: &ToolCall, err: &AskError) -> ToolResult {
        let message = err.to_string();
        let payload = json!({
            "answered": false,
            "cancelled": false,
            "timedOut": false,
            "answers": [],
            "error": message,
        });
        ToolResult::error(&call.id, self.name(), message).with_output(payload.to_string())
    }
}

#[async_trait]
impl Tool for AskUserTool {
    fn name(&self) -> &str {
        "ask_user"
    }

    fn description(&self) -> &str {
        "Ask the user one or more questions and wait for the answers. Use this when you need \
        clarification, a decision between options, or confirmation before continuing. The call \
        blocks until the user answers, cancels, or the question times out."
    }

    fn schema(&self) -> ToolSchema {
        create_schema(self.name(), self.description())
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let input = match AskUserInput::from_value(call.arguments_value()) {
            Ok(input) => input,
            Err(e) => {
                warn!(call_id = %call.id, error = %e, "rejected ask_user arguments");
                return Ok(self.invalid_arguments(call, &e));
            }
        };

        let output = ask_user(input, self.bridge.as_ref(), &self.registry).await;
        let text = serde_json::to_string(&output)?;

        Ok(ToolResult::success(&call.id, self.name(), text)
            .with_metadata("answered", output.answered)
            .with_metadata("renderConfirmed", output.render_confirmed))
    }

    /// Waiting on a person is bounded by the registry's timers, not a tool deadline
    fn max_execution_duration(&self) -> Option<Duration> {
        None
    }

    fn requires_user_interaction(&self) -> bool {
        true
    }
}
