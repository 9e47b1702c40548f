//! Configuration for the askbridge server
//!
//! Layers, later wins: defaults, config file, `ASKBRIDGE_*` environment,
//! then whatever the CLI applies on top.

pub mod env_loader;
pub mod file_loader;
pub mod logging_config;
pub mod model;
pub mod timeouts;

pub use env_loader::apply_env_overrides;
pub use file_loader::load_from_file;
pub use logging_config::LoggingConfig;
pub use model::{AskbridgeConfig, PendingConfig, RegistrationConfig, ServerConfig};

use crate::error::AskResult;
use std::path::Path;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "askbridge.toml";

/// Load file and environment layers, then validate
pub fn load_config(path: Option<&Path>) -> AskResult<AskbridgeConfig> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    let mut config = load_from_file(path)?;
    apply_env_overrides(&mut config)?;
    config.validate()?;
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}
