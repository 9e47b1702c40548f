//! Environment variable overrides

use super::model::AskbridgeConfig;
use crate::error::{AskError, AskResult};
use std::env;

pub const ENV_HOST: &str = "ASKBRIDGE_HOST";
pub const ENV_PORT: &str = "ASKBRIDGE_PORT";
pub const ENV_ANSWER_TIMEOUT: &str = "ASKBRIDGE_ANSWER_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "ASKBRIDGE_LOG_LEVEL";

/// Apply `ASKBRIDGE_*` environment variables on top of `config`
pub fn apply_env_overrides(config: &mut AskbridgeConfig) -> AskResult<()> {
    apply_overrides_from(config, |key| env::var(key).ok())
}

/// Apply overrides using an arbitrary variable lookup
pub fn apply_overrides_from<F>(config: &mut AskbridgeConfig, lookup: F) -> AskResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup(ENV_HOST) {
        config.server.host = host;
    }

    if let Some(port) = lookup(ENV_PORT) {
        config.server.port = port
            .parse()
            .map_err(|_| AskError::config(format!("Invalid {} value: {}", ENV_PORT, port)))?;
    }

    if let Some(secs) = lookup(ENV_ANSWER_TIMEOUT) {
        config.pending.answer_timeout_secs = secs.parse().map_err(|_| {
            AskError::config(format!("Invalid {} value: {}", ENV_ANSWER_TIMEOUT, secs))
        })?;
    }

    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        config.logging.level = level;
    }

    Ok(())
}
