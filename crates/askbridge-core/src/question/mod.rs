//! Question and answer wire types shared by the tool, the registry and the relay
//!
//! Field names follow the camelCase JSON the MCP client and the UI exchange.

mod input;
mod output;
mod types;
pub mod validation;

pub use input::AskUserInput;
pub use output::AskUserOutput;
pub use types::{Question, QuestionAnswer, QuestionType};
pub use validation::{validate_input, validate_question};
