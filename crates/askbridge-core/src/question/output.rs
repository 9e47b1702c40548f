//! Terminal result of one ask_user call

use super::types::QuestionAnswer;
use serde::{Deserialize, Serialize};

/// What the tool reports back to its caller.
///
/// At most one of `answered`, `cancelled` and `timed_out` is true.
/// `retry_reason` is present exactly when the request ended on the render-timeout path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskUserOutput {
    pub answered: bool,
    pub cancelled: bool,
    pub timed_out: bool,
    pub should_retry: bool,
    pub retry_reason: Option<String>,
    pub render_confirmed: bool,
    pub answers: Vec<QuestionAnswer>,
}

impl AskUserOutput {
    pub fn answered(answers: Vec<QuestionAnswer>, render_confirmed: bool) -> Self {
        Self {
            answered: true,
            answers,
            ..Self::unresolved(render_confirmed)
        }
    }

    pub fn cancelled(render_confirmed: bool) -> Self {
        Self {
            cancelled: true,
            ..Self::unresolved(render_confirmed)
        }
    }

    pub fn timed_out(render_confirmed: bool) -> Self {
        Self {
            timed_out: true,
            ..Self::unresolved(render_confirmed)
        }
    }

    /// The UI never confirmed it displayed the question
    pub fn render_timeout(should_retry: bool, reason: impl Into<String>) -> Self {
        Self {
            should_retry,
            retry_reason: Some(reason.into()),
            ..Self::unresolved(false)
        }
    }

    /// Ended without an answer for a reason that is none of the above (shutdown, expiry)
    pub fn unresolved(render_confirmed: bool) -> Self {
        Self {
            answered: false,
            cancelled: false,
            timed_out: false,
            should_retry: false,
            retry_reason: None,
            render_confirmed,
            answers: Vec::new(),
        }
    }
}
