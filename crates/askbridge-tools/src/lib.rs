//! Tool implementations for askbridge

pub mod tools;

// Re-export tools
pub use tools::interaction::ask_user::{AskUserTool, ask_user, generate_request_id};

use askbridge_core::bridge::QuestionBridge;
use askbridge_core::pending::PendingRequestRegistry;
use askbridge_core::tools::Tool;
use std::sync::Arc;

/// Get all default tools, bound to the given bridge and registry
pub fn get_default_tools(
    bridge: Arc<dyn QuestionBridge>,
    registry: PendingRequestRegistry,
) -> Vec<Arc<dyn Tool>> {
    vec![Arc::new(AskUserTool::new(bridge, registry))]
}
