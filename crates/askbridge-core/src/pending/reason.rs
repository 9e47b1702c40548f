//! Why a pending request ended without an answer

use crate::question::AskUserOutput;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The user or UI cancelled the question
    Cancelled,
    /// No answer arrived within the answer deadline
    Timeout,
    /// The UI never confirmed it displayed the question
    RenderTimeout,
    /// Swept by `cleanup` after outliving the maximum request age
    Expired,
    /// The server is stopping
    ShuttingDown,
    /// The UI host went away with the question still open
    WindowClosed,
}

impl RejectReason {
    /// Output for every reason except `RenderTimeout`, which needs the retry budget
    pub(crate) fn to_output(&self, render_confirmed: bool) -> AskUserOutput {
        match self {
            Self::Cancelled => AskUserOutput::cancelled(render_confirmed),
            Self::Timeout => AskUserOutput::timed_out(render_confirmed),
            _ => AskUserOutput::unresolved(render_confirmed),
        }
    }

    /// Wire name used in relay `rejected` notices
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cancelled => "cancelled",
            Self::Timeout => "timeout",
            Self::RenderTimeout => "render-timeout",
            Self::Expired => "expired",
            Self::ShuttingDown => "shutting-down",
            Self::WindowClosed => "session-stop",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => f.write_str("cancelled"),
            Self::Timeout => f.write_str("question timeout"),
            Self::RenderTimeout => f.write_str("render timeout"),
            Self::Expired => f.write_str("request expired"),
            Self::ShuttingDown => f.write_str("server shutting down"),
            Self::WindowClosed => f.write_str("window closed"),
        }
    }
}
