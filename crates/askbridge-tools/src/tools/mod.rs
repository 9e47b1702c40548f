//! Tool implementations grouped by concern

pub mod interaction;

pub use interaction::AskUserTool;
