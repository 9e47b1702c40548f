//! Tool abstraction exposed over the MCP `tools/*` methods

pub mod error;
pub mod registry;
pub mod tool_trait;
pub mod types;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use tool_trait::Tool;
pub use types::{ToolCall, ToolResult, ToolSchema};
