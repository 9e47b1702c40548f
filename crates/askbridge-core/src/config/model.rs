//! Server configuration model

use super::logging_config::LoggingConfig;
use super::timeouts;
use crate::error::{AskError, AskResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    /// 0 picks a free port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
        }
    }
}

/// Pending request lifetimes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendingConfig {
    pub answer_timeout_secs: u64,
    pub cleanup_interval_secs: u64,
    pub max_request_age_secs: u64,
}

impl Default for PendingConfig {
    fn default() -> Self {
        Self {
            answer_timeout_secs: timeouts::answer::DEFAULT_SECS,
            cleanup_interval_secs: timeouts::cleanup::INTERVAL_SECS,
            max_request_age_secs: timeouts::cleanup::MAX_AGE_SECS,
        }
    }
}

impl PendingConfig {
    pub fn answer_timeout(&self) -> Duration {
        Duration::from_secs(self.answer_timeout_secs)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }

    pub fn max_request_age(&self) -> Duration {
        Duration::from_secs(self.max_request_age_secs)
    }
}

/// Where `register` writes the MCP client entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    /// Defaults to `~/.gemini/antigravity/mcp_config.json`
    pub config_path: Option<PathBuf>,
    pub server_name: String,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            server_name: "ask-user".to_string(),
        }
    }
}

impl RegistrationConfig {
    pub fn resolved_path(&self) -> AskResult<PathBuf> {
        if let Some(path) = &self.config_path {
            return Ok(path.clone());
        }
        let home = dirs::home_dir()
            .ok_or_else(|| AskError::config("Could not determine home directory"))?;
        Ok(home.join(".gemini").join("antigravity").join("mcp_config.json"))
    }
}

/// Top-level askbridge configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AskbridgeConfig {
    pub server: ServerConfig,
    pub pending: PendingConfig,
    pub logging: LoggingConfig,
    pub registration: RegistrationConfig,
}

impl AskbridgeConfig {
    /// Check cross-field constraints
    pub fn validate(&self) -> AskResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(AskError::config("server.host must not be empty"));
        }
        if self.pending.answer_timeout_secs == 0 {
            return Err(AskError::config("pending.answer_timeout_secs must be positive"));
        }
        if self.pending.cleanup_interval_secs == 0 {
            return Err(AskError::config("pending.cleanup_interval_secs must be positive"));
        }
        if self.pending.max_request_age_secs < self.pending.answer_timeout_secs {
            return Err(AskError::config_with_context(
                "pending.max_request_age_secs must not be shorter than the answer timeout",
                format!(
                    "max_request_age_secs={}, answer_timeout_secs={}",
                    self.pending.max_request_age_secs, self.pending.answer_timeout_secs
                ),
            ));
        }
        if self.registration.server_name.trim().is_empty() {
            return Err(AskError::config("registration.server_name must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AskbridgeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 0);
        assert_eq!(config.pending.answer_timeout(), Duration::from_secs(300));
        assert_eq!(config.registration.server_name, "ask-user");
    }

    #[test]
    fn test_rejects_zero_answer_timeout() {
        let mut config = AskbridgeConfig::default();
        config.pending.answer_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_max_age_below_answer_timeout() {
        let mut config = AskbridgeConfig::default();
        config.pending.max_request_age_secs = 10;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_request_age_secs"));
    }

    #[test]
    fn test_explicit_registration_path_wins() {
        let config = RegistrationConfig {
            config_path: Some(PathBuf::from("/tmp/mcp.json")),
            ..Default::default()
        };
        assert_eq!(config.resolved_path().unwrap(), PathBuf::from("/tmp/mcp.json"));
    }
}
