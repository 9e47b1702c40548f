//! ask_user tool: pause a tool call until a human answers
//!
//! `operation` runs one question lifecycle against a bridge and a registry;
//! `tool` exposes it through the `Tool` trait for the JSON-RPC layer.

mod operation;
mod schema;
mod tool;

#[cfg(test)]
mod tests;

// Re-export public items
pub use operation::{ask_user, generate_request_id};
pub use schema::create_schema;
pub use tool::AskUserTool;
