//! Pending request record

use crate::config::timeouts::retry;
use crate::question::Question;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// A question set waiting on the UI.
///
/// Values returned by the registry are snapshots; timers and the completion
/// channel stay inside the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub id: String,
    pub questions: Vec<Question>,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub render_confirmed: bool,
    pub max_retries: u32,
    /// Render-timeout retries consumed so far, never above `max_retries`
    pub retry_count: u32,
    /// Deadline for render confirmation. `None` skips the confirmation
    /// protocol and arms the answer timer at registration.
    pub render_timeout: Option<Duration>,
    /// Overrides the registry's default answer deadline
    pub answer_timeout: Option<Duration>,
}

impl PendingRequest {
    pub fn new(id: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            id: id.into(),
            questions,
            title: None,
            created_at: Utc::now(),
            render_confirmed: false,
            max_retries: retry::DEFAULT_MAX_RETRIES,
            retry_count: 0,
            render_timeout: None,
            answer_timeout: None,
        }
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self.retry_count = self.retry_count.min(max_retries);
        self
    }

    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count.min(self.max_retries);
        self
    }

    pub fn with_render_timeout(mut self, timeout: Duration) -> Self {
        self.render_timeout = Some(timeout);
        self
    }

    pub fn with_answer_timeout(mut self, timeout: Duration) -> Self {
        self.answer_timeout = Some(timeout);
        self
    }

    pub fn can_retry(&self) -> bool {
        self.retry_count < self.max_retries
    }
}
