//! Question bridge over a JSON Lines byte stream

use super::protocol::RelayMessage;
use crate::bridge::{AnswerHandler, BridgeHandlers, QuestionAsked, QuestionBridge, RejectNotice, RequestHandler};
use crate::error::{AskError, AskResult};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Relay-backed bridge.
///
/// Inbound lines are handled one at a time by a single reader task, so events
/// for the same request reach the handlers in the order the UI wrote them.
/// When the stream ends, every request this relay dispatched and has not seen
/// settled gets a session-stop.
pub struct RelayBridge {
    outbound_tx: mpsc::UnboundedSender<RelayMessage>,
    handlers: Arc<BridgeHandlers>,
    outstanding: Arc<Mutex<HashSet<String>>>,
}

/// Background tasks driving a relay
pub struct RelayTasks {
    pub reader: JoinHandle<()>,
    pub writer: JoinHandle<()>,
}

impl RelayTasks {
    pub fn abort(&self) {
        self.reader.abort();
        self.writer.abort();
    }
}

impl RelayBridge {
    /// Start a relay over the given stream halves
    pub fn spawn<R, W>(reader: R, writer: W) -> (Self, RelayTasks)
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let handlers = Arc::new(BridgeHandlers::new());
        let outstanding = Arc::new(Mutex::new(HashSet::new()));

        let writer = tokio::spawn(run_writer(writer, outbound_rx));
        let reader = tokio::spawn(run_reader(reader, handlers.clone(), outstanding.clone()));

        let bridge = Self {
            outbound_tx,
            handlers,
            outstanding,
        };
        (bridge, RelayTasks { reader, writer })
    }

    /// Relay over this process's stdin and stdout
    pub fn stdio() -> (Self, RelayTasks) {
        Self::spawn(tokio::io::stdin(), tokio::io::stdout())
    }

    /// Requests dispatched through this relay and not yet settled by the UI
    pub fn outstanding(&self) -> usize {
        self.outstanding.lock().len()
    }

    fn send(&self, message: RelayMessage) -> AskResult<()> {
        self.outbound_tx
            .send(message)
            .map_err(|_| AskError::relay("relay writer has stopped"))
    }
}

impl QuestionBridge for RelayBridge {
    fn send_question(&self, question: &QuestionAsked) -> AskResult<()> {
        self.outstanding.lock().insert(question.request_id.clone());
        if let Err(e) = self.send(RelayMessage::from(question)) {
            self.outstanding.lock().remove(&question.request_id);
            return Err(e);
        }
        debug!(request_id = %question.request_id, "question relayed to UI");
        Ok(())
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
        self.outstanding.lock().remove(&notice.request_id);
        if let Err(e) = self.send(RelayMessage::from(notice)) {
            debug!(request_id = %notice.request_id, error = %e, "rejected notice dropped");
        }
    }

    fn forget(&self, request_id: &str) {
        self.outstanding.lock().remove(request_id);
    }
}

async fn run_writer<W>(writer: W, mut outbound_rx: mpsc::UnboundedReceiver<RelayMessage>)
where
    W: AsyncWrite + Unpin,
{
    let mut writer = writer;
    while let Some(message) = outbound_rx.recv().await {
        let line = match message.to_json_line() {
            Ok(line) => line,
            Err(e) => {
                error!(request_id = %message.request_id(), error = %e, "failed to encode relay message");
                continue;
            }
        };
        if let Err(e) = writer.write_all(line.as_bytes()).await {
            error!(error = %e, "relay write failed, closing writer");
            break;
        }
        if let Err(e) = writer.flush().await {
            error!(error = %e, "relay flush failed, closing writer");
            break;
        }
    }
    debug!("relay writer stopped");
}

async fn run_reader<R>(
    reader: R,
    handlers: Arc<BridgeHandlers>,
    outstanding: Arc<Mutex<HashSet<String>>>,
) where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("relay input closed");
                break;
            }
            Err(e) => {
                error!(error = %e, "relay read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let message = match RelayMessage::from_json_line(&line) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "skipping malformed relay line");
                continue;
            }
        };

        match message {
            RelayMessage::Answer {
                request_id,
                answers,
            } => {
                outstanding.lock().remove(&request_id);
                handlers.dispatch_answer(&request_id, answers);
            }
            RelayMessage::Cancel { request_id } => {
                outstanding.lock().remove(&request_id);
                handlers.dispatch_cancel(&request_id);
            }
            RelayMessage::RenderConfirmed { request_id } => {
                handlers.dispatch_render_confirmed(&request_id);
            }
            RelayMessage::SessionStop { request_id } => {
                outstanding.lock().remove(&request_id);
                handlers.dispatch_session_stop(&request_id);
            }
            other @ (RelayMessage::QuestionAsked { .. } | RelayMessage::Rejected { .. }) => {
                warn!(request_id = %other.request_id(), "ignoring server-bound message from UI");
            }
        }
    }

    let orphaned: Vec<String> = outstanding.lock().drain().collect();
    if !orphaned.is_empty() {
        warn!(count = orphaned.len(), "UI host gone, stopping open requests");
    }
    for request_id in orphaned {
        handlers.dispatch_session_stop(&request_id);
    }
}
