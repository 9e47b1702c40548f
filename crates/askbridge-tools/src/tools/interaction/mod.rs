//! User interaction tools
//!
//! Tools that hand a question to a person through the question bridge and
//! block the calling request until that person answers, cancels or the
//! question times out.

pub mod ask_user;

// Re-export the main tool
pub use ask_user::AskUserTool;
