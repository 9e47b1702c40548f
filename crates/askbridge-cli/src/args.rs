//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "askbridge")]
#[command(about = "askbridge - human-in-the-loop ask_user MCP server")]
#[command(
    long_about = r#"askbridge - human-in-the-loop ask_user MCP server

USAGE:
  askbridge serve                  # Serve on a free port, relay over stdio
  askbridge serve --port 7821      # Serve on a fixed port
  askbridge serve --register       # Also add the MCP client entry
  askbridge register --port 7821   # Add the MCP client entry
  askbridge unregister             # Remove the MCP client entry
  askbridge tools                  # List exposed tools"#
)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (TOML, or JSON by extension)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the MCP server and relay questions over stdin/stdout
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (0 picks a free port)
        #[arg(long)]
        port: Option<u16>,

        /// Register with the MCP client while running, unregister on exit
        #[arg(long)]
        register: bool,
    },

    /// Add this server to the MCP client configuration
    Register {
        /// Port the server listens on
        #[arg(long)]
        port: u16,

        /// Host the server listens on
        #[arg(long)]
        host: Option<String>,
    },

    /// Remove this server from the MCP client configuration
    Unregister,

    /// List all available tools and their descriptions
    Tools,
}
