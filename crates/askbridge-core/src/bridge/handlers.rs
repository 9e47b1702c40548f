//! Handler slots shared by bridge implementations

use super::types::{AnswerHandler, RequestHandler};
use crate::question::QuestionAnswer;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::warn;

type SharedAnswer = Arc<dyn Fn(&str, Vec<QuestionAnswer>) + Send + Sync>;
type SharedRequest = Arc<dyn Fn(&str) + Send + Sync>;

/// One slot per event kind. Handlers are cloned out of the lock before they
/// run, so a handler may call back into the bridge.
#[derive(Default)]
pub struct BridgeHandlers {
    answer: RwLock<Option<SharedAnswer>>,
    cancel: RwLock<Option<SharedRequest>>,
    render_confirmed: RwLock<Option<SharedRequest>>,
    session_stop: RwLock<Option<SharedRequest>>,
}

impl BridgeHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_answer(&self, handler: AnswerHandler) {
        *self.answer.write() = Some(Arc::from(handler));
    }

    pub fn set_cancel(&self, handler: RequestHandler) {
        *self.cancel.write() = Some(Arc::from(handler));
    }

    pub fn set_render_confirmed(&self, handler: RequestHandler) {
        *self.render_confirmed.write() = Some(Arc::from(handler));
    }

    pub fn set_session_stop(&self, handler: RequestHandler) {
        *self.session_stop.write() = Some(Arc::from(handler));
    }

    pub fn dispatch_answer(&self, request_id: &str, answers: Vec<QuestionAnswer>) {
        let handler = self.answer.read().clone();
        match handler {
            Some(handler) => handler(request_id, answers),
            None => warn!(request_id, "answer received before a handler was registered"),
        }
    }

    pub fn dispatch_cancel(&self, request_id: &str) {
        Self::dispatch(&self.cancel, request_id, "cancel");
    }

    pub fn dispatch_render_confirmed(&self, request_id: &str) {
        Self::dispatch(&self.render_confirmed, request_id, "render confirmation");
    }

    pub fn dispatch_session_stop(&self, request_id: &str) {
        Self::dispatch(&self.session_stop, request_id, "session stop");
    }

    fn dispatch(slot: &RwLock<Option<SharedRequest>>, request_id: &str, kind: &str) {
        let handler = slot.read().clone();
        match handler {
            Some(handler) => handler(request_id),
            None => warn!(request_id, kind, "event received before a handler was registered"),
        }
    }
}

impl std::fmt::Debug for BridgeHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeHandlers")
            .field("answer", &self.answer.read().is_some())
            .field("cancel", &self.cancel.read().is_some())
            .field("render_confirmed", &self.render_confirmed.read().is_some())
            .field("session_stop", &self.session_stop.read().is_some())
            .finish()
    }
}
