//! askbridge command-line interface
//!
//! Serves the `ask_user` MCP tool over JSON-RPC/HTTP and relays each question
//! to a UI host process over stdin/stdout as JSON Lines.
//!
//! # Commands
//!
//! - `askbridge serve`: run the server until SIGINT/SIGTERM or until the UI
//!   host closes stdin. `--register` also writes the MCP client entry.
//! - `askbridge register --port N` / `askbridge unregister`: edit the MCP
//!   client configuration by hand.
//! - `askbridge tools`: list the tools the server exposes.
//!
//! Logs go to stderr; stdout belongs to the relay.

mod args;
mod commands;
mod logging;
mod router;
mod server;
mod signal_handler;

use askbridge_core::config::load_config;
use askbridge_core::error::AskResult;
use args::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> AskResult<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    logging::init(&config.logging, cli.verbose);

    router::route(cli, config).await
}
