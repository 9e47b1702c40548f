//! In-memory registry of pending requests and their timers

use super::reason::RejectReason;
use super::request::PendingRequest;
use crate::config::timeouts;
use crate::error::{AskError, AskResult};
use crate::question::{AskUserOutput, QuestionAnswer};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    Render,
    Answer,
}

struct Entry {
    request: PendingRequest,
    /// Distinguishes registrations that reuse an id after a render retry
    token: u64,
    registered_at: Instant,
    completion: oneshot::Sender<AskUserOutput>,
    render_timer: Option<AbortHandle>,
    answer_timer: Option<AbortHandle>,
}

impl Entry {
    fn disarm(&mut self) {
        if let Some(timer) = self.render_timer.take() {
            timer.abort();
        }
        if let Some(timer) = self.answer_timer.take() {
            timer.abort();
        }
    }

    fn complete(self, output: AskUserOutput) {
        if self.completion.send(output).is_err() {
            debug!(request_id = %self.request.id, "caller stopped waiting before completion");
        }
    }
}

/// Called with the id of every request that reaches a terminal outcome
pub type SettleListener = Box<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
struct State {
    entries: HashMap<String, Entry>,
    next_token: u64,
    closed: bool,
}

struct Shared {
    state: Mutex<State>,
    default_answer_timeout: Duration,
    settle_listener: RwLock<Option<SettleListener>>,
}

/// Shared handle to the pending request map.
///
/// Cloning is cheap; all clones see the same requests. Timer tasks hold only a
/// weak reference, so dropping every handle cancels nothing explicitly but
/// lets late timers fall through harmlessly.
#[derive(Clone)]
pub struct PendingRequestRegistry {
    shared: Arc<Shared>,
}

impl Default for PendingRequestRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PendingRequestRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRequestRegistry")
            .field("pending", &self.count())
            .field("default_answer_timeout", &self.shared.default_answer_timeout)
            .finish()
    }
}

impl PendingRequestRegistry {
    /// Registry with the default 5 minute answer deadline
    pub fn new() -> Self {
        Self::with_answer_timeout(timeouts::answer::default_timeout())
    }

    pub fn with_answer_timeout(default_answer_timeout: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State::default()),
                default_answer_timeout,
                settle_listener: RwLock::new(None),
            }),
        }
    }

    /// Register a request and return the receiver its caller waits on.
    ///
    /// Arms the render timer when the record carries a render timeout,
    /// otherwise arms the answer timer straight away. Must be called from
    /// within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `AskError::InvalidInput` if a request with the same id is
    /// already pending, and `AskError::Other` once the registry is closed.
    pub fn add(&self, request: PendingRequest) -> AskResult<oneshot::Receiver<AskUserOutput>> {
        let (tx, rx) = oneshot::channel();
        let id = request.id.clone();

        let mut state = self.shared.state.lock();
        if state.closed {
            return Err(AskError::other(format!(
                "Pending request registry is closed, '{}' not registered",
                id
            )));
        }
        if state.entries.contains_key(&id) {
            return Err(AskError::invalid_field(
                "id",
                format!("Pending request '{}' is already registered", id),
            ));
        }
        state.next_token += 1;
        let token = state.next_token;

        let mut entry = Entry {
            token,
            registered_at: Instant::now(),
            completion: tx,
            render_timer: None,
            answer_timer: None,
            request,
        };
        match entry.request.render_timeout {
            Some(delay) => {
                entry.render_timer = Some(self.spawn_timer(&id, token, delay, TimerKind::Render));
            }
            None => {
                let delay = self.answer_timeout_for(&entry.request);
                entry.answer_timer = Some(self.spawn_timer(&id, token, delay, TimerKind::Answer));
            }
        }

        debug!(
            request_id = %id,
            questions = entry.request.questions.len(),
            retry_count = entry.request.retry_count,
            max_retries = entry.request.max_retries,
            "pending request registered"
        );
        state.entries.insert(id, entry);
        Ok(rx)
    }

    /// Install the listener told about every settled request, replacing any
    /// previous one. It runs before the waiting caller is woken.
    pub fn on_settled(&self, listener: SettleListener) {
        *self.shared.settle_listener.write() = Some(listener);
    }

    /// Complete a request with the user's answers.
    ///
    /// Answers naming a question the request does not carry are dropped.
    /// Returns false for unknown ids, which covers late and duplicate answers.
    pub fn resolve(&self, id: &str, answers: Vec<QuestionAnswer>) -> bool {
        let Some(entry) = self.take_if(id, |_| true) else {
            debug!(request_id = %id, "no pending request for answer");
            return false;
        };

        let (answers, foreign): (Vec<_>, Vec<_>) = answers.into_iter().partition(|answer| {
            entry
                .request
                .questions
                .iter()
                .any(|question| question.id.as_deref() == Some(answer.question_id.as_str()))
        });
        if !foreign.is_empty() {
            warn!(
                request_id = %id,
                dropped = foreign.len(),
                "answers for unknown question ids dropped"
            );
        }

        info!(request_id = %id, answers = answers.len(), "pending request answered");
        let render_confirmed = entry.request.render_confirmed;
        self.settle(entry, AskUserOutput::answered(answers, render_confirmed));
        true
    }

    /// Complete a request without an answer. Returns false for unknown ids.
    pub fn reject(&self, id: &str, reason: RejectReason) -> bool {
        let Some(entry) = self.take_if(id, |_| true) else {
            debug!(request_id = %id, %reason, "no pending request to reject");
            return false;
        };
        self.complete_rejected(entry, reason);
        true
    }

    /// Record that the UI displayed the question.
    ///
    /// Disarms the render timer and arms the answer timer. Confirming twice is
    /// harmless. Returns false for unknown ids.
    pub fn confirm_render(&self, id: &str) -> bool {
        let mut state = self.shared.state.lock();
        let Some(entry) = state.entries.get_mut(id) else {
            debug!(request_id = %id, "no pending request for render confirmation");
            return false;
        };
        if entry.request.render_confirmed {
            return true;
        }

        entry.request.render_confirmed = true;
        if let Some(timer) = entry.render_timer.take() {
            timer.abort();
        }
        if entry.answer_timer.is_none() {
            let delay = self.answer_timeout_for(&entry.request);
            entry.answer_timer = Some(self.spawn_timer(id, entry.token, delay, TimerKind::Answer));
        }
        info!(request_id = %id, "render confirmed, answer timer armed");
        true
    }

    /// Whether the request exists and still has render retries left
    pub fn can_retry(&self, id: &str) -> bool {
        self.shared
            .state
            .lock()
            .entries
            .get(id)
            .is_some_and(|entry| entry.request.can_retry())
    }

    /// Consume one render retry. Saturates at `max_retries`; false for unknown ids.
    pub fn increment_retry(&self, id: &str) -> bool {
        let mut state = self.shared.state.lock();
        let Some(entry) = state.entries.get_mut(id) else {
            return false;
        };
        let request = &mut entry.request;
        request.retry_count = (request.retry_count + 1).min(request.max_retries);
        true
    }

    /// Snapshot of one pending request
    pub fn get(&self, id: &str) -> Option<PendingRequest> {
        self.shared
            .state
            .lock()
            .entries
            .get(id)
            .map(|entry| entry.request.clone())
    }

    /// Snapshots of every pending request, oldest first
    pub fn get_all(&self) -> Vec<PendingRequest> {
        let state = self.shared.state.lock();
        let mut entries: Vec<&Entry> = state.entries.values().collect();
        entries.sort_by_key(|entry| entry.token);
        entries.into_iter().map(|entry| entry.request.clone()).collect()
    }

    /// Ids of every pending request, oldest first
    pub fn ids(&self) -> Vec<String> {
        let state = self.shared.state.lock();
        let mut entries: Vec<(&String, u64)> = state
            .entries
            .iter()
            .map(|(id, entry)| (id, entry.token))
            .collect();
        entries.sort_by_key(|(_, token)| *token);
        entries.into_iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.shared.state.lock().entries.contains_key(id)
    }

    pub fn count(&self) -> usize {
        self.shared.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Reject every request registered longer than `max_age` ago with
    /// `RejectReason::Expired`. Returns how many were swept.
    pub fn cleanup(&self, max_age: Duration) -> usize {
        let stale: Vec<String> = {
            let state = self.shared.state.lock();
            state
                .entries
                .iter()
                .filter(|(_, entry)| entry.registered_at.elapsed() > max_age)
                .map(|(id, _)| id.clone())
                .collect()
        };

        let swept = stale
            .iter()
            .filter(|id| self.reject(id, RejectReason::Expired))
            .count();
        if swept > 0 {
            warn!(swept, max_age_secs = max_age.as_secs(), "expired pending requests swept");
        }
        swept
    }

    /// Reject everything still pending, for host teardown.
    ///
    /// Returns the ids that were rejected.
    pub fn reject_all(&self, reason: RejectReason) -> Vec<String> {
        self.drain(reason, false)
    }

    /// Refuse new registrations and reject everything still pending.
    ///
    /// Both happen under one lock, so no request can slip in between.
    /// Returns the ids that were rejected.
    pub fn close(&self, reason: RejectReason) -> Vec<String> {
        self.drain(reason, true)
    }

    pub fn is_closed(&self) -> bool {
        self.shared.state.lock().closed
    }

    fn drain(&self, reason: RejectReason, close: bool) -> Vec<String> {
        let drained: Vec<Entry> = {
            let mut state = self.shared.state.lock();
            state.closed |= close;
            let mut drained: Vec<Entry> = state.entries.drain().map(|(_, entry)| entry).collect();
            drained.sort_by_key(|entry| entry.token);
            drained
        };

        if !drained.is_empty() {
            info!(count = drained.len(), %reason, "rejecting all pending requests");
        }
        drained
            .into_iter()
            .map(|entry| {
                let id = entry.request.id.clone();
                self.complete_rejected(entry, reason);
                id
            })
            .collect()
    }

    fn complete_rejected(&self, entry: Entry, reason: RejectReason) {
        let output = match reason {
            RejectReason::RenderTimeout => Self::render_timeout_output(&entry.request),
            other => other.to_output(entry.request.render_confirmed),
        };
        info!(
            request_id = %entry.request.id,
            %reason,
            should_retry = output.should_retry,
            "pending request rejected"
        );
        self.settle(entry, output);
    }

    /// Stop the timers, tell the listener, then wake the caller
    fn settle(&self, mut entry: Entry, output: AskUserOutput) {
        entry.disarm();
        if let Some(listener) = self.shared.settle_listener.read().as_ref() {
            listener(&entry.request.id);
        }
        entry.complete(output);
    }

    /// Whether the caller may re-dispatch, judged on the retries already consumed
    fn render_timeout_output(request: &PendingRequest) -> AskUserOutput {
        if request.retry_count < request.max_retries {
            AskUserOutput::render_timeout(
                true,
                format!(
                    "UI failed to render question (attempt {}/{})",
                    request.retry_count, request.max_retries
                ),
            )
        } else {
            AskUserOutput::render_timeout(
                false,
                format!("Max retries ({}) exceeded", request.max_retries),
            )
        }
    }

    /// Remove the entry for `id` if `accept` agrees, all under one lock
    fn take_if(&self, id: &str, accept: impl FnOnce(&Entry) -> bool) -> Option<Entry> {
        let mut state = self.shared.state.lock();
        if !state.entries.get(id).is_some_and(accept) {
            return None;
        }
        state.entries.remove(id)
    }

    fn answer_timeout_for(&self, request: &PendingRequest) -> Duration {
        request
            .answer_timeout
            .unwrap_or(self.shared.default_answer_timeout)
    }

    fn spawn_timer(&self, id: &str, token: u64, delay: Duration, kind: TimerKind) -> AbortHandle {
        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        let id = id.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(shared) = shared.upgrade() {
                PendingRequestRegistry { shared }.on_timer(&id, token, kind);
            }
        })
        .abort_handle()
    }

    fn on_timer(&self, id: &str, token: u64, kind: TimerKind) {
        let entry = self.take_if(id, |entry| {
            entry.token == token
                && match kind {
                    TimerKind::Render => !entry.request.render_confirmed,
                    TimerKind::Answer => true,
                }
        });
        let Some(mut entry) = entry else {
            return;
        };

        match kind {
            TimerKind::Render => {
                warn!(request_id = %id, "UI did not confirm render in time");
                let request = &mut entry.request;
                request.retry_count = (request.retry_count + 1).min(request.max_retries);
                self.complete_rejected(entry, RejectReason::RenderTimeout);
            }
            TimerKind::Answer => {
                warn!(request_id = %id, "no answer before deadline");
                self.complete_rejected(entry, RejectReason::Timeout);
            }
        }
    }
}
