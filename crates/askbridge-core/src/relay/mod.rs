//! Cross-process relay
//!
//! Carries bridge traffic as JSON Lines over a byte stream, normally the
//! stdin/stdout pair shared with the UI host process.

mod bridge;
mod protocol;

pub use bridge::{RelayBridge, RelayTasks};
pub use protocol::{RelayMessage, QUESTION_SOURCE};
