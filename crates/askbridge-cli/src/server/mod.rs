//! JSON-RPC over HTTP transport for the MCP tool server

mod cleanup;
mod routes;


pub use cleanup::spawn_sweeper;
pub use routes::{AppState, mcp_router};

use askbridge_core::config::AskbridgeConfig;
use askbridge_core::error::{AskError, AskResult};
use askbridge_core::mcp::McpServerHandler;
use askbridge_core::pending::{PendingRequestRegistry, RejectReason};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// How long `stop` waits for open connections to drain
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

struct Running {
    port: u16,
    shutdown: CancellationToken,
    serve_task: JoinHandle<()>,
    sweeper: JoinHandle<()>,
}

/// HTTP front end bound to one pending request registry
pub struct McpHttpServer {
    config: AskbridgeConfig,
    handler: Arc<McpServerHandler>,
    registry: PendingRequestRegistry,
    running: Option<Running>,
}

impl McpHttpServer {
    pub fn new(
        config: AskbridgeConfig,
        handler: McpServerHandler,
        registry: PendingRequestRegistry,
    ) -> Self {
        Self {
            config,
            handler: Arc::new(handler),
            registry,
            running: None,
        }
    }

    /// Bind and start serving. Returns the bound port, which differs from the
    /// configured one when that is 0. Starting twice returns the same port.
    pub async fn start(&mut self) -> AskResult<u16> {
        if let Some(running) = &self.running {
            return Ok(running.port);
        }

        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| AskError::io(format!("Failed to bind {}: {}", addr, e)))?;
        let port = listener.local_addr()?.port();

        let app = mcp_router(AppState {
            handler: self.handler.clone(),
            registry: self.registry.clone(),
            port,
        });

        let shutdown = CancellationToken::new();
        let signal = shutdown.clone();
        let serve_task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(signal.cancelled_owned())
                .await
            {
                error!("MCP HTTP server error: {e}");
            }
        });

        let sweeper = spawn_sweeper(
            self.registry.clone(),
            self.config.pending.cleanup_interval(),
            self.config.pending.max_request_age(),
        );

        info!(host = %self.config.server.host, port, "MCP server listening");
        self.running = Some(Running {
            port,
            shutdown,
            serve_task,
            sweeper,
        });
        Ok(port)
    }

    pub fn port(&self) -> Option<u16> {
        self.running.as_ref().map(|running| running.port)
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Stop serving.
    ///
    /// The registry is closed first: every pending request is rejected so
    /// blocked `tools/call` responses can complete before the listener shuts
    /// down, and calls arriving during the grace period settle at once.
    pub async fn stop(&mut self) {
        let Some(mut running) = self.running.take() else {
            return;
        };

        let rejected = self.registry.close(RejectReason::ShuttingDown);
        if !rejected.is_empty() {
            info!(count = rejected.len(), "pending requests rejected for shutdown");
        }

        running.sweeper.abort();
        running.shutdown.cancel();
        match tokio::time::timeout(SHUTDOWN_GRACE, &mut running.serve_task).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("MCP server task ended abnormally: {e}"),
            Err(_) => {
                warn!(grace_secs = SHUTDOWN_GRACE.as_secs(), "connections still open, aborting server");
                running.serve_task.abort();
            }
        }
        info!(port = running.port, "MCP server stopped");
    }
}
