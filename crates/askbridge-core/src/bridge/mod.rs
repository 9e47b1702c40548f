//! Question bridge: the capability the tool layer uses to reach the UI
//!
//! A bridge pushes questions out and reports what the UI does with them.
//! `connect_bridge` wires those reports into a `PendingRequestRegistry`.

mod channel;
mod connect;
mod handlers;
mod types;

pub use channel::{BridgeOutbound, ChannelBridge, ChannelBridgeHandle, UiEvent};
pub use connect::connect_bridge;
pub use handlers::BridgeHandlers;
pub use types::{AnswerHandler, QuestionAsked, QuestionBridge, RejectNotice, RequestHandler};
