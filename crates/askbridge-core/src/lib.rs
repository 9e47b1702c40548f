//! askbridge core library
//!
//! The pieces that let a tool call wait on a person: the pending request
//! registry and its timers, the question bridge capability, the JSON Lines
//! relay to a UI process, the MCP protocol types and the tool abstraction.

pub mod bridge;
pub mod config;
pub mod error;
pub mod mcp;
pub mod pending;
pub mod question;
pub mod relay;
pub mod tools;

// Re-export commonly used types
pub use bridge::{ChannelBridge, ChannelBridgeHandle, QuestionAsked, QuestionBridge, connect_bridge};
pub use config::AskbridgeConfig;
pub use error::{AskError, AskResult, UnifiedError};
pub use pending::{PendingRequest, PendingRequestRegistry, RejectReason};
pub use question::{AskUserInput, AskUserOutput, Question, QuestionAnswer, QuestionType};
pub use relay::{RelayBridge, RelayMessage};
pub use tools::{Tool, ToolCall, ToolError, ToolRegistry, ToolResult, ToolSchema};
