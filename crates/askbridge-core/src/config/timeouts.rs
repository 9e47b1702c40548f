//! Centralized timeout configuration
//!
//! Default timeout values for the question lifecycle. Per-call values come
//! from the tool arguments, server-wide values from `PendingConfig`.

use std::time::Duration;

/// Render confirmation deadline, in milliseconds
pub mod render {
    /// Default time the UI has to confirm display (30 seconds)
    pub const DEFAULT_MS: u64 = 30_000;

    /// Smallest accepted render timeout (10 seconds)
    pub const MIN_MS: u64 = 10_000;

    /// Largest accepted render timeout (60 seconds)
    pub const MAX_MS: u64 = 60_000;
}

/// Render-timeout retry budget
pub mod retry {
    pub const DEFAULT_MAX_RETRIES: u32 = 3;

    pub const MAX_RETRIES: u32 = 5;
}

/// Deadline for an answer once the question is on screen
pub mod answer {
    use super::*;

    /// Default answer timeout (5 minutes)
    pub const DEFAULT_SECS: u64 = 300;

    pub fn default_timeout() -> Duration {
        Duration::from_secs(DEFAULT_SECS)
    }
}

/// Periodic sweep of stale pending requests
pub mod cleanup {
    /// How often the sweep runs (1 minute)
    pub const INTERVAL_SECS: u64 = 60;

    /// Requests older than this are force-rejected (30 minutes)
    pub const MAX_AGE_SECS: u64 = 1800;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_bounds_contain_default() {
        assert!(render::MIN_MS <= render::DEFAULT_MS && render::DEFAULT_MS <= render::MAX_MS);
    }

    #[test]
    fn test_cleanup_outlives_answer_deadline() {
        assert!(cleanup::MAX_AGE_SECS > answer::DEFAULT_SECS);
    }
}
