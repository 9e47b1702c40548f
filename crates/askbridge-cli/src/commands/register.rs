//! MCP client registration
//!
//! Adds or removes this server's entry under `mcpServers` in the client's JSON
//! config. Other entries and unknown top-level keys are preserved; writes go
//! through a temp file and a rename so the client never reads a half-written
//! file.

use askbridge_core::config::RegistrationConfig;
use askbridge_core::error::{AskError, AskResult};
use serde_json::{Map, Value, json};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const MCP_SERVERS_KEY: &str = "mcpServers";

/// Register the server listening on `host:port`
pub fn register(config: &RegistrationConfig, host: &str, port: u16) -> AskResult<()> {
    let path = config.resolved_path()?;
    let url = server_url(host, port);
    write_entry(&path, &config.server_name, json!({ "serverUrl": url }))?;
    info!(path = %path.display(), name = %config.server_name, %url, "registered with MCP client");
    Ok(())
}

/// Remove the entry; returns whether one was present
pub fn unregister(config: &RegistrationConfig) -> AskResult<bool> {
    let path = config.resolved_path()?;
    let removed = remove_entry(&path, &config.server_name)?;
    if removed {
        info!(path = %path.display(), name = %config.server_name, "unregistered from MCP client");
    } else {
        info!(path = %path.display(), name = %config.server_name, "no registration to remove");
    }
    Ok(removed)
}

/// URL MCP clients use to reach the JSON-RPC endpoint
pub fn server_url(host: &str, port: u16) -> String {
    // A wildcard bind is reachable on loopback
    let host = match host {
        "0.0.0.0" | "::" | "[::]" => "127.0.0.1",
        other => other,
    };
    if host.contains(':') && !host.starts_with('[') {
        format!("http://[{}]:{}/mcp", host, port)
    } else {
        format!("http://{}:{}/mcp", host, port)
    }
}

pub(crate) fn write_entry(path: &Path, name: &str, entry: Value) -> AskResult<()> {
    let mut root = read_client_config(path)?;
    let servers = root
        .entry(MCP_SERVERS_KEY)
        .or_insert_with(|| Value::Object(Map::new()));
    if !servers.is_object() {
        *servers = Value::Object(Map::new());
    }
    if let Value::Object(servers) = servers {
        servers.insert(name.to_string(), entry);
    }
    write_atomic(path, &Value::Object(root))
}

pub(crate) fn remove_entry(path: &Path, name: &str) -> AskResult<bool> {
    if !path.exists() {
        debug!(path = %path.display(), "no MCP client config");
        return Ok(false);
    }
    let mut root = read_client_config(path)?;
    let removed = root
        .get_mut(MCP_SERVERS_KEY)
        .and_then(Value::as_object_mut)
        .and_then(|servers| servers.remove(name))
        .is_some();
    if removed {
        write_atomic(path, &Value::Object(root))?;
    }
    Ok(removed)
}

/// Missing file reads as empty. A file that is not a JSON object is an error
/// rather than something to overwrite.
fn read_client_config(path: &Path) -> AskResult<Map<String, Value>> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let content = fs::read_to_string(path)
        .map_err(|e| AskError::io_with_path(e.to_string(), path.display().to_string()))?;
    if content.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AskError::config(format!(
            "MCP client config {} is not a JSON object",
            path.display()
        ))),
        Err(e) => Err(AskError::config_with_context(
            format!("MCP client config {} is not valid JSON: {}", path.display(), e),
            "Fix or remove the file before registering",
        )),
    }
}

fn write_atomic(path: &Path, value: &Value) -> AskResult<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .map_err(|e| AskError::io_with_path(e.to_string(), dir.display().to_string()))?;
    }
    let content = serde_json::to_string_pretty(value)?;
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content)
        .map_err(|e| AskError::io_with_path(e.to_string(), temp_path.display().to_string()))?;
    fs::rename(&temp_path, path)
        .map_err(|e| AskError::io_with_path(e.to_string(), path.display().to_string()))?;
    Ok(())
}
