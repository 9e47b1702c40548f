//! Structural checks for ask_user input

use super::input::AskUserInput;
use super::types::Question;
use crate::error::{AskError, AskResult};

pub const MIN_QUESTIONS: usize = 1;
pub const MAX_QUESTIONS: usize = 10;
pub const MAX_QUESTION_CHARS: usize = 1000;
pub const MAX_TITLE_CHARS: usize = 100;

/// Validate the question set and title
pub fn validate_input(input: &AskUserInput) -> AskResult<()> {
    if input.questions.len() < MIN_QUESTIONS {
        return Err(AskError::invalid_field(
            "questions",
            "At least one question is required",
        ));
    }

    if input.questions.len() > MAX_QUESTIONS {
        return Err(AskError::invalid_field(
            "questions",
            format!("Maximum of {} questions allowed per call", MAX_QUESTIONS),
        ));
    }

    if let Some(title) = &input.title {
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(AskError::invalid_field(
                "title",
                format!("Title exceeds {} characters", MAX_TITLE_CHARS),
            ));
        }
    }

    for (idx, question) in input.questions.iter().enumerate() {
        validate_question(idx, question)?;
    }

    Ok(())
}

/// Validate a single question
pub fn validate_question(idx: usize, question: &Question) -> AskResult<()> {
    let len = question.question.chars().count();
    if len == 0 {
        return Err(AskError::invalid_field(
            "questions",
            format!("Question {} has empty question text", idx + 1),
        ));
    }

    if len > MAX_QUESTION_CHARS {
        return Err(AskError::invalid_field(
            "questions",
            format!(
                "Question {} exceeds {} characters (length: {})",
                idx + 1,
                MAX_QUESTION_CHARS,
                len
            ),
        ));
    }

    if question.question_type.requires_options()
        && question.options.as_ref().is_none_or(|o| o.is_empty())
    {
        return Err(AskError::invalid_field(
            "questions",
            format!(
                "Question {}: options required for {} questions",
                idx + 1,
                question.question_type
            ),
        ));
    }

    Ok(())
}
