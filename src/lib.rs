//! askbridge: pause a tool call until a human answers
//!
//! Facade over the workspace crates. `askbridge-core` holds the pending
//! request registry, the question bridge and relay, and the MCP protocol
//! types; `askbridge-tools` holds the `ask_user` tool built on top of them.

pub use askbridge_core::{bridge, config, error, mcp, pending, question, relay};
pub use askbridge_core::{
    AskError, AskResult, AskUserInput, AskUserOutput, ChannelBridge, ChannelBridgeHandle,
    PendingRequest, PendingRequestRegistry, Question, QuestionAnswer, QuestionAsked,
    QuestionBridge, QuestionType, RejectReason, RelayBridge, RelayMessage, connect_bridge,
};
pub use askbridge_core::tools::{Tool, ToolCall, ToolRegistry, ToolResult};
pub use askbridge_tools::{AskUserTool, ask_user, get_default_tools};
