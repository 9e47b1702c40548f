//! Error types for askbridge
//!
//! All errors implement the `UnifiedError` trait which provides consistent fields:
//! - error_code: A unique identifier for programmatic error handling
//! - message: Human-readable error message
//! - context: Optional additional context about where/why the error occurred
//!
//! Note that the terminal outcomes of a question (answered, cancelled, timed out,
//! render timeout) are never errors. They are reported as `AskUserOutput` values.

mod constructors;
mod conversions;
mod types;
mod unified_error;

pub use types::{AskError, AskResult, UnifiedError};
