//! File-based configuration loading

use super::model::AskbridgeConfig;
use crate::error::{AskError, AskResult};
use std::fs;
use std::path::Path;

/// Load configuration from a file
///
/// Supports JSON and TOML based on file extension.
/// Returns default config if file doesn't exist.
pub fn load_from_file(path: &Path) -> AskResult<AskbridgeConfig> {
    if !path.exists() {
        return Ok(AskbridgeConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        AskError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    let config: AskbridgeConfig = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|e| {
            AskError::config_with_context(
                format!("Failed to parse JSON config: {}", e),
                format!("Deserializing JSON configuration from '{}'", path.display()),
            )
        })?,
        _ => toml::from_str(&content).map_err(|e| {
            AskError::config_with_context(
                format!("Failed to parse TOML config: {}", e),
                format!("Deserializing TOML configuration from '{}'", path.display()),
            )
        })?,
    };

    Ok(config)
}
