//! Periodic sweep of requests that outlived every timer

use askbridge_core::pending::PendingRequestRegistry;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Run `registry.cleanup(max_age)` every `every` until aborted
pub fn spawn_sweeper(
    registry: PendingRequestRegistry,
    every: Duration,
    max_age: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let swept = registry.cleanup(max_age);
            debug!(swept, pending = registry.count(), "cleanup sweep");
        }
    })
}
