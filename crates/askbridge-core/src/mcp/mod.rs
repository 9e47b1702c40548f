//! MCP (Model Context Protocol) message types, server side

pub mod protocol;
pub mod server;
pub mod types;

pub use protocol::{
    JSONRPC_VERSION, MCP_PROTOCOL_VERSION, McpRequest, McpResponse, McpRpcError, RequestId,
    methods,
};
pub use server::McpServerHandler;
pub use types::{
    CallToolParams, InitializeResult, McpCapabilities, McpContent, McpServerInfo, McpTool,
    McpToolResult, ToolCapabilities,
};
