//! In-process bridge over tokio channels
//!
//! Used when the UI lives in the same process, and by tests that play the UI.

use super::handlers::BridgeHandlers;
use super::types::{AnswerHandler, QuestionAsked, QuestionBridge, RejectNotice, RequestHandler};
use crate::error::{AskError, AskResult};
use crate::question::QuestionAnswer;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Messages flowing from the server to the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeOutbound {
    Asked(QuestionAsked),
    Rejected(RejectNotice),
}

/// Events flowing from the UI to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Answer {
        request_id: String,
        answers: Vec<QuestionAnswer>,
    },
    Cancel {
        request_id: String,
    },
    RenderConfirmed {
        request_id: String,
    },
    SessionStop {
        request_id: String,
    },
}

/// Server side of the channel bridge
pub struct ChannelBridge {
    outbound_tx: mpsc::UnboundedSender<BridgeOutbound>,
    handlers: Arc<BridgeHandlers>,
}

/// UI side: receives questions and sends events back
pub struct ChannelBridgeHandle {
    pub outbound_rx: mpsc::UnboundedReceiver<BridgeOutbound>,
    pub event_tx: mpsc::UnboundedSender<UiEvent>,
}

impl ChannelBridge {
    /// Create a bridge and its UI handle.
    ///
    /// Spawns the task that delivers UI events to the registered handlers in
    /// the order they were sent; it ends once the handle is dropped.
    pub fn new() -> (Self, ChannelBridgeHandle) {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
        let handlers = Arc::new(BridgeHandlers::new());

        let pump = handlers.clone();
        tokio::spawn(async move {
            while let Some(event) = event_rx.recv().await {
                match event {
                    UiEvent::Answer {
                        request_id,
                        answers,
                    } => pump.dispatch_answer(&request_id, answers),
                    UiEvent::Cancel { request_id } => pump.dispatch_cancel(&request_id),
                    UiEvent::RenderConfirmed { request_id } => {
                        pump.dispatch_render_confirmed(&request_id)
                    }
                    UiEvent::SessionStop { request_id } => pump.dispatch_session_stop(&request_id),
                }
            }
            debug!("channel bridge event stream closed");
        });

        let bridge = Self {
            outbound_tx,
            handlers,
        };
        let handle = ChannelBridgeHandle {
            outbound_rx,
            event_tx,
        };
        (bridge, handle)
    }
}

impl QuestionBridge for ChannelBridge {
    fn send_question(&self, question: &QuestionAsked) -> AskResult<()> {
        self.outbound_tx
            .send(BridgeOutbound::Asked(question.clone()))
            .map_err(|_| AskError::bridge("UI side of the channel bridge is closed"))
    }

    fn on_answer(&self, handler: AnswerHandler) {
        self.handlers.set_answer(handler);
    }

    fn on_cancel(&self, handler: RequestHandler) {
        self.handlers.set_cancel(handler);
    }

    fn on_render_confirmed(&self, handler: RequestHandler) {
        self.handlers.set_render_confirmed(handler);
    }

    fn on_session_stop(&self, handler: RequestHandler) {
        self.handlers.set_session_stop(handler);
    }

    fn notify_rejected(&self, notice: &RejectNotice) {
        if self
            .outbound_tx
            .send(BridgeOutbound::Rejected(notice.clone()))
            .is_err()
        {
            debug!(request_id = %notice.request_id, "UI gone, rejected notice dropped");
        }
    }
}

impl ChannelBridgeHandle {
    /// Next question sent to the UI, skipping rejected notices
    pub async fn next_question(&mut self) -> Option<QuestionAsked> {
        loop {
            match self.outbound_rx.recv().await? {
                BridgeOutbound::Asked(question) => return Some(question),
                BridgeOutbound::Rejected(_) => continue,
            }
        }
    }

    /// Next message of any kind
    pub async fn recv(&mut self) -> Option<BridgeOutbound> {
        self.outbound_rx.recv().await
    }

    pub fn answer(&self, request_id: &str, answers: Vec<QuestionAnswer>) -> AskResult<()> {
        self.send(UiEvent::Answer {
            request_id: request_id.to_string(),
            answers,
        })
    }

    pub fn cancel(&self, request_id: &str) -> AskResult<()> {
        self.send(UiEvent::Cancel {
            request_id: request_id.to_string(),
        })
    }

    pub fn confirm_render(&self, request_id: &str) -> AskResult<()> {
        self.send(UiEvent::RenderConfirmed {
            request_id: request_id.to_string(),
        })
    }

    pub fn session_stop(&self, request_id: &str) -> AskResult<()> {
        self.send(UiEvent::SessionStop {
            request_id: request_id.to_string(),
        })
    }

    fn send(&self, event: UiEvent) -> AskResult<()> {
        self.event_tx
            .send(event)
            .map_err(|_| AskError::bridge("channel bridge event pump has stopped"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::connect_bridge;
    use crate::pending::{PendingRequest, PendingRequestRegistry};
    use crate::question::Question;
    use std::time::Duration;

    fn asked(id: &str) -> QuestionAsked {
        QuestionAsked {
            request_id: id.to_string(),
            questions: vec![Question::text("Is this a test?").with_id(format!("{id}_0"))],
            title: None,
        }
    }

    async fn wired() -> (Arc<ChannelBridge>, ChannelBridgeHandle, PendingRequestRegistry) {
        let (bridge, handle) = ChannelBridge::new();
        let bridge = Arc::new(bridge);
        let registry = PendingRequestRegistry::new();
        connect_bridge(bridge.clone(), registry.clone());
        (bridge, handle, registry)
    }

    #[tokio::test]
    async fn test_send_question_reaches_handle() {
        let (bridge, mut handle, _registry) = wired().await;
        bridge.send_question(&asked("req_1")).unwrap();
        assert_eq!(handle.next_question().await, Some(asked("req_1")));
    }

    #[tokio::test]
    async fn test_answer_resolves_registry() {
        let (_bridge, handle, registry) = wired().await;
        let rx = registry.add(PendingRequest::new("req_2", asked("req_2").questions)).unwrap();

        handle.confirm_render("req_2").unwrap();
        handle
            .answer("req_2", vec![QuestionAnswer::new("req_2_0", ["yes"])])
            .unwrap();

        let out = rx.await.unwrap();
        assert!(out.answered);
        assert!(out.render_confirmed);
        assert_eq!(registry.count(), 0);
    }

    #[tokio::test]
    async fn test_cancel_rejects_and_notifies_ui() {
        let (_bridge, mut handle, registry) = wired().await;
        let rx = registry.add(PendingRequest::new("req_3", vec![])).unwrap();

        handle.cancel("req_3").unwrap();
        assert!(rx.await.unwrap().cancelled);

        match handle.recv().await {
            Some(BridgeOutbound::Rejected(notice)) => {
                assert_eq!(notice.request_id, "req_3");
                assert_eq!(notice.reason, "cancelled");
                assert!(notice.cancelled);
                assert!(!notice.timed_out);
            }
            other => panic!("expected rejected notice, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_duplicate_events_after_completion_are_dropped() {
        let (_bridge, mut handle, registry) = wired().await;
        let rx = registry.add(PendingRequest::new("req_4", vec![])).unwrap();

        handle.answer("req_4", vec![]).unwrap();
        handle.cancel("req_4").unwrap();
        handle.answer("req_4", vec![]).unwrap();

        assert!(rx.await.unwrap().answered);
        // the late cancel must not produce a rejected notice
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(handle.outbound_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_session_stop_sends_session_stop_notice() {
        let (_bridge, mut handle, registry) = wired().await;
        let rx = registry.add(PendingRequest::new("req_5", vec![])).unwrap();

        handle.session_stop("req_5").unwrap();
        let out = rx.await.unwrap();
        assert!(!out.answered && !out.cancelled);

        match handle.recv().await {
            Some(BridgeOutbound::Rejected(notice)) => assert_eq!(notice.reason, "session-stop"),
            other => panic!("expected rejected notice, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_fails_when_ui_dropped() {
        let (bridge, handle) = ChannelBridge::new();
        drop(handle);
        assert!(bridge.send_question(&asked("req_6")).is_err());
    }
}
