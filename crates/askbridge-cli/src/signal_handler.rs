//! SIGINT / SIGTERM handling for graceful shutdown

use askbridge_core::error::{AskError, AskResult};
use futures::stream::StreamExt;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook_tokio::{Handle, Signals};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Turns the first SIGINT or SIGTERM into a cancelled shutdown token
pub struct SignalHandler {
    shutdown: CancellationToken,
    handle: Handle,
    task: JoinHandle<()>,
}

impl SignalHandler {
    /// Register the signal handlers and start listening
    pub fn start() -> AskResult<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM])
            .map_err(|e| AskError::other(format!("Failed to register signal handlers: {}", e)))?;
        let handle = signals.handle();
        let shutdown = CancellationToken::new();

        let token = shutdown.clone();
        let task = tokio::spawn(async move {
            while let Some(signal) = signals.next().await {
                match signal {
                    SIGINT => info!("received SIGINT, shutting down"),
                    SIGTERM => info!("received SIGTERM, shutting down"),
                    _ => continue,
                }
                token.cancel();
                break;
            }
        });

        Ok(Self {
            shutdown,
            handle,
            task,
        })
    }

    /// Token cancelled once shutdown has been requested
    pub fn token(&self) -> CancellationToken {
        self.shutdown.clone()
    }
}

impl Drop for SignalHandler {
    fn drop(&mut self) {
        self.handle.close();
        self.task.abort();
    }
}
