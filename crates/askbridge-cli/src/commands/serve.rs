//! `serve`: MCP HTTP server plus the stdio relay to the UI host

use crate::commands::register;
use crate::server::McpHttpServer;
use crate::signal_handler::SignalHandler;
use askbridge_core::bridge::{QuestionBridge, connect_bridge};
use askbridge_core::config::AskbridgeConfig;
use askbridge_core::error::AskResult;
use askbridge_core::mcp::{McpServerHandler, McpServerInfo};
use askbridge_core::pending::PendingRequestRegistry;
use askbridge_core::relay::RelayBridge;
use askbridge_core::tools::ToolRegistry;
use askbridge_tools::get_default_tools;
use std::sync::Arc;
use tracing::{info, warn};

/// Name reported in `initialize`
pub const SERVER_NAME: &str = "askbridge";

pub fn server_info() -> McpServerInfo {
    McpServerInfo {
        name: SERVER_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Run until a signal arrives or the UI host closes stdin
pub async fn run(config: AskbridgeConfig, register_client: bool) -> AskResult<()> {
    let signals = SignalHandler::start()?;
    let shutdown = signals.token();

    let registry = PendingRequestRegistry::with_answer_timeout(config.pending.answer_timeout());
    let (relay, mut relay_tasks) = RelayBridge::stdio();
    let bridge: Arc<dyn QuestionBridge> = Arc::new(relay);
    connect_bridge(bridge.clone(), registry.clone());

    let tools = ToolRegistry::with_tools(get_default_tools(bridge.clone(), registry.clone()));
    let handler = McpServerHandler::new(server_info(), tools);
    let registration = config.registration.clone();
    let host = config.server.host.clone();

    let mut server = McpHttpServer::new(config, handler, registry);
    let port = server.start().await?;

    if register_client {
        if let Err(e) = register::register(&registration, &host, port) {
            warn!(error = %e, "MCP client registration failed, continuing without it");
        }
    }

    tokio::select! {
        _ = shutdown.cancelled() => {}
        _ = &mut relay_tasks.reader => {
            info!("UI host closed the relay, shutting down");
        }
    }

    server.stop().await;
    if register_client {
        if let Err(e) = register::unregister(&registration) {
            warn!(error = %e, "MCP client unregistration failed");
        }
    }
    relay_tasks.abort();
    Ok(())
}
