//! Bridge capability and the messages it carries

use crate::error::AskResult;
use crate::pending::RejectReason;
use crate::question::{Question, QuestionAnswer};
use serde::{Deserialize, Serialize};

/// Called with the request id and the user's answers
pub type AnswerHandler = Box<dyn Fn(&str, Vec<QuestionAnswer>) + Send + Sync>;

/// Called with a request id (cancel, render confirmation, session stop)
pub type RequestHandler = Box<dyn Fn(&str) + Send + Sync>;

/// A question set on its way to the UI; every question carries its id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAsked {
    pub request_id: String,
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Tells the UI a question it may still be showing is gone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectNotice {
    pub request_id: String,
    pub reason: String,
    pub timed_out: bool,
    pub cancelled: bool,
}

impl RejectNotice {
    pub fn new(request_id: impl Into<String>, reason: &RejectReason) -> Self {
        Self {
            request_id: request_id.into(),
            reason: reason.as_str().to_string(),
            timed_out: matches!(reason, RejectReason::Timeout),
            cancelled: matches!(reason, RejectReason::Cancelled),
        }
    }
}

/// Transport-agnostic link to the UI.
///
/// `send_question` is fire-and-forget: a successful return means the message
/// was handed to the transport, not that anyone saw it. Handlers are
/// process-wide; registering again replaces the previous handler. A bridge
/// may deliver duplicate or late events, the registry ignores them.
pub trait QuestionBridge: Send + Sync {
    /// Push a question set to the UI
    fn send_question(&self, question: &QuestionAsked) -> AskResult<()>;

    /// Register the handler for answers
    fn on_answer(&self, handler: AnswerHandler);

    /// Register the handler for cancellations
    fn on_cancel(&self, handler: RequestHandler);

    /// Register the handler for "question is on screen" confirmations
    fn on_render_confirmed(&self, handler: RequestHandler);

    /// Register the handler invoked when the UI host disappears with a request open
    fn on_session_stop(&self, handler: RequestHandler) {
        let _ = handler;
    }

    /// Tell the UI a request ended without an answer
    fn notify_rejected(&self, notice: &RejectNotice) {
        let _ = notice;
    }

    /// Drop any per-request bookkeeping once the request has settled
    fn forget(&self, request_id: &str) {
        let _ = request_id;
    }
}
