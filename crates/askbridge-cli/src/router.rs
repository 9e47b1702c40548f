//! Command routing logic for CLI

use crate::args::{Cli, Commands};
use crate::commands;
use askbridge_core::config::AskbridgeConfig;
use askbridge_core::error::AskResult;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli, mut config: AskbridgeConfig) -> AskResult<()> {
    match cli.command {
        Commands::Serve {
            host,
            port,
            register,
        } => {
            apply_server_overrides(&mut config, host, port);
            commands::serve::run(config, register).await
        }
        Commands::Register { port, host } => {
            apply_server_overrides(&mut config, host, Some(port));
            commands::register::register(&config.registration, &config.server.host, port)
        }
        Commands::Unregister => commands::register::unregister(&config.registration).map(|_| ()),
        Commands::Tools => commands::tools::show_tools(),
    }
}

/// CLI flags are the last configuration layer
fn apply_server_overrides(config: &mut AskbridgeConfig, host: Option<String>, port: Option<u16>) {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
}
