//! Arguments accepted by the ask_user operation

use super::types::Question;
use super::validation::validate_input;
use crate::config::timeouts::{render, retry};
use crate::error::{AskError, AskResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Validated ask_user arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskUserInput {
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Render-timeout retries allowed before the request fails terminally
    pub max_retries: u32,
    /// Milliseconds the UI has to confirm it displayed the question
    pub render_timeout: u64,
}

/// Wire shape before range checks. Numbers stay untyped so that negative,
/// fractional and oversized values are reported instead of failing to parse.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAskUserInput {
    questions: Vec<Question>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    max_retries: Option<Value>,
    #[serde(default)]
    render_timeout: Option<Value>,
}

impl AskUserInput {
    /// Input with default retry budget and render timeout
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            title: None,
            max_retries: retry::DEFAULT_MAX_RETRIES,
            render_timeout: render::DEFAULT_MS,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_render_timeout_ms(mut self, render_timeout: u64) -> Self {
        self.render_timeout = render_timeout;
        self
    }

    /// Parse and validate raw tool arguments.
    ///
    /// Out-of-range `maxRetries` / `renderTimeout` values are rejected here so
    /// nothing is ever registered for a malformed call.
    pub fn from_value(value: Value) -> AskResult<Self> {
        let raw: RawAskUserInput = serde_json::from_value(value)
            .map_err(|e| AskError::invalid_input(format!("Invalid ask_user arguments: {}", e)))?;

        let max_retries = match raw.max_retries {
            None | Some(Value::Null) => retry::DEFAULT_MAX_RETRIES,
            Some(v) => integer_in_range("maxRetries", &v, 0, retry::MAX_RETRIES as i64)? as u32,
        };
        let render_timeout = match raw.render_timeout {
            None | Some(Value::Null) => render::DEFAULT_MS,
            Some(v) => integer_in_range(
                "renderTimeout",
                &v,
                render::MIN_MS as i64,
                render::MAX_MS as i64,
            )? as u64,
        };

        let input = Self {
            questions: raw.questions,
            title: raw.title,
            max_retries,
            render_timeout,
        };
        validate_input(&input)?;
        Ok(input)
    }

    /// Clamp numeric settings into their allowed ranges.
    ///
    /// Used when the input was built in code rather than parsed from a tool call.
    pub fn normalized(mut self) -> Self {
        self.max_retries = self.max_retries.min(retry::MAX_RETRIES);
        self.render_timeout = self.render_timeout.clamp(render::MIN_MS, render::MAX_MS);
        self
    }

    pub fn render_timeout_duration(&self) -> Duration {
        Duration::from_millis(self.render_timeout)
    }
}

fn integer_in_range(field: &str, value: &Value, min: i64, max: i64) -> AskResult<i64> {
    let n = value
        .as_i64()
        .ok_or_else(|| AskError::invalid_field(field, format!("{} must be an integer", field)))?;
    if n < min || n > max {
        return Err(AskError::invalid_field(
            field,
            format!("{} must be between {} and {} (got {})", field, min, max, n),
        ));
    }
    Ok(n)
}
