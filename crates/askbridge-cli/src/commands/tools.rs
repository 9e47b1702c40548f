//! Tools command implementation

use askbridge_core::bridge::ChannelBridge;
use askbridge_core::error::AskResult;
use askbridge_core::pending::PendingRequestRegistry;
use askbridge_core::tools::Tool;
use askbridge_tools::get_default_tools;
use std::sync::Arc;

/// Show available tools and their descriptions
pub fn show_tools() -> AskResult<()> {
    // Listing only needs the schemas; nothing is dispatched through this bridge
    let (bridge, _ui) = ChannelBridge::new();
    let tools = get_default_tools(Arc::new(bridge), PendingRequestRegistry::new());

    println!("Available Tools\n");
    println!("{:<12} Description", "Tool Name");
    println!("{:<12} -----------", "---------");
    for tool in &tools {
        println!("{:<12} {}", tool.name(), tool.description());
    }
    println!("\nTotal tools available: {}", tools.len());

    Ok(())
}
