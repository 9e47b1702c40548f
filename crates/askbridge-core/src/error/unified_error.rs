//! UnifiedError trait implementation for AskError

use super::types::{AskError, UnifiedError};

impl UnifiedError for AskError {
    fn error_code(&self) -> &str {
        match self {
            Self::Config { .. } => "ASK_CONFIG",
            Self::InvalidInput { .. } => "ASK_INVALID_INPUT",
            Self::Bridge { .. } => "ASK_BRIDGE",
            Self::Relay { .. } => "ASK_RELAY",
            Self::Tool { .. } => "ASK_TOOL",
            Self::Io { .. } => "ASK_IO",
            Self::Json { .. } => "ASK_JSON",
            Self::Timeout { .. } => "ASK_TIMEOUT",
            Self::NotFound { .. } => "ASK_NOT_FOUND",
            Self::Other { .. } => "ASK_OTHER",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Config { message, .. } => message,
            Self::InvalidInput { message, .. } => message,
            Self::Bridge { message, .. } => message,
            Self::Relay { message, .. } => message,
            Self::Tool { message, .. } => message,
            Self::Io { message, .. } => message,
            Self::Json { message, .. } => message,
            Self::Timeout { .. } => "Operation timeout",
            Self::NotFound { message, .. } => message,
            Self::Other { message, .. } => message,
        }
    }

    fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. }
            | Self::InvalidInput { context, .. }
            | Self::Bridge { context, .. }
            | Self::Relay { context, .. }
            | Self::Tool { context, .. }
            | Self::Io { context, .. }
            | Self::Json { context, .. }
            | Self::Timeout { context, .. }
            | Self::NotFound { context, .. }
            | Self::Other { context, .. } => context.as_deref(),
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::Bridge { .. } | Self::Timeout { .. })
    }
}
