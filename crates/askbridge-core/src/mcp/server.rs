//! JSON-RPC method dispatch for an MCP tool server
//!
//! Transport-independent: the HTTP layer hands over request bodies and writes
//! back whatever comes out. Notifications produce no response.

use super::protocol::{JSONRPC_VERSION, MCP_PROTOCOL_VERSION, McpRequest, McpResponse, McpRpcError, RequestId, methods};
use super::types::{
    CallToolParams, InitializeResult, McpCapabilities, McpServerInfo, McpTool, McpToolResult,
    ToolCapabilities,
};
use crate::tools::{ToolCall, ToolRegistry};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

/// Answers `initialize`, `ping`, `tools/list` and `tools/call`
pub struct McpServerHandler {
    info: McpServerInfo,
    tools: ToolRegistry,
}

impl McpServerHandler {
    pub fn new(info: McpServerInfo, tools: ToolRegistry) -> Self {
        Self { info, tools }
    }

    pub fn server_info(&self) -> &McpServerInfo {
        &self.info
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Handle a raw request body.
    ///
    /// Unparseable JSON yields a parse error with a null id; a JSON value that
    /// is not a request yields an invalid-request error.
    pub async fn handle_json(&self, body: &[u8]) -> Option<McpResponse> {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "unparseable JSON-RPC body");
                return Some(McpResponse::error(None, McpRpcError::parse_error()));
            }
        };

        let id = value
            .get("id")
            .and_then(|id| serde_json::from_value::<RequestId>(id.clone()).ok());
        match serde_json::from_value::<McpRequest>(value) {
            Ok(request) => self.handle(request).await,
            Err(e) => Some(McpResponse::error(
                id,
                McpRpcError::invalid_request().with_data(json!(e.to_string())),
            )),
        }
    }

    /// Handle one decoded request
    pub async fn handle(&self, request: McpRequest) -> Option<McpResponse> {
        if request.jsonrpc != JSONRPC_VERSION {
            return Some(McpResponse::error(
                request.id,
                McpRpcError::invalid_request()
                    .with_data(json!(format!("unsupported jsonrpc version '{}'", request.jsonrpc))),
            ));
        }

        let Some(id) = request.id.clone() else {
            self.handle_notification(&request);
            return None;
        };

        debug!(method = %request.method, id = %id, "JSON-RPC request");
        let outcome = match request.method.as_str() {
            methods::INITIALIZE => to_result(&self.initialize_result()),
            methods::PING => Ok(json!({})),
            methods::TOOLS_LIST => Ok(self.list_tools()),
            methods::TOOLS_CALL => self.call_tool(&id, request.params).await,
            other => {
                warn!(method = other, "unknown JSON-RPC method");
                Err(McpRpcError::method_not_found().with_data(json!(other)))
            }
        };

        Some(match outcome {
            Ok(result) => McpResponse::success(Some(id), result),
            Err(error) => McpResponse::error(Some(id), error),
        })
    }

    fn handle_notification(&self, request: &McpRequest) {
        match request.method.as_str() {
            methods::INITIALIZED => info!("client initialized"),
            methods::CANCELLED => debug!(params = ?request.params, "client cancelled a request"),
            other => debug!(method = other, "ignoring notification"),
        }
    }

    fn initialize_result(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
            capabilities: McpCapabilities {
                tools: Some(ToolCapabilities {
                    list_changed: false,
                }),
            },
            server_info: self.info.clone(),
        }
    }

    fn list_tools(&self) -> Value {
        let tools: Vec<McpTool> = self
            .tools
            .all()
            .map(|tool| {
                let schema = tool.schema();
                McpTool::new(schema.name)
                    .with_description(schema.description)
                    .with_input_schema(schema.parameters)
            })
            .collect();
        json!({ "tools": tools })
    }

    async fn call_tool(&self, id: &RequestId, params: Option<Value>) -> Result<Value, McpRpcError> {
        let params: CallToolParams = params
            .ok_or_else(|| McpRpcError::invalid_params().with_data(json!("missing params")))
            .and_then(|params| {
                serde_json::from_value(params)
                    .map_err(|e| McpRpcError::invalid_params().with_data(json!(e.to_string())))
            })?;

        let Some(tool) = self.tools.get(&params.name) else {
            warn!(tool = %params.name, "tools/call for unknown tool");
            return Err(McpRpcError::new(-32602, format!("Unknown tool: {}", params.name)));
        };

        let arguments = params.arguments.unwrap_or_default().into_iter().collect();
        let call = ToolCall::new(id.to_string(), params.name.clone(), arguments);

        info!(tool = %params.name, call_id = %call.id, "tool invoked");
        let result = tool.execute_with_timing(&call).await;
        if !result.success {
            warn!(
                tool = %params.name,
                error = result.error.as_deref().unwrap_or(""),
                "tool returned an error result"
            );
        }

        to_result(&McpToolResult::text(result.text(), !result.success))
    }
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, McpRpcError> {
    serde_json::to_value(value)
        .map_err(|e| McpRpcError::internal_error().with_data(json!(e.to_string())))
}
