//! Question definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the UI should collect an answer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    #[default]
    Text,
    Select,
    MultiSelect,
    Confirm,
}

impl QuestionType {
    /// Whether the question must carry a non-empty option list
    pub fn requires_options(self) -> bool {
        matches!(self, Self::Select | Self::MultiSelect)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Select => "select",
            Self::MultiSelect => "multi-select",
            Self::Confirm => "confirm",
        };
        f.write_str(name)
    }
}

fn default_required() -> bool {
    true
}

/// A single question shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable id; assigned as `{requestId}_{index}` when the caller omits it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Prompt text
    pub question: String,
    #[serde(rename = "type", default)]
    pub question_type: QuestionType,
    /// Choices for select and multi-select questions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl Question {
    /// Create a required free-text question
    pub fn text(question: impl Into<String>) -> Self {
        Self {
            id: None,
            question: question.into(),
            question_type: QuestionType::Text,
            options: None,
            required: true,
            placeholder: None,
        }
    }

    /// Create a single-choice question
    pub fn select<I, S>(question: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question_type: QuestionType::Select,
            options: Some(options.into_iter().map(Into::into).collect()),
            ..Self::text(question)
        }
    }

    /// Create a multiple-choice question
    pub fn multi_select<I, S>(question: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question_type: QuestionType::MultiSelect,
            ..Self::select(question, options)
        }
    }

    /// Create a yes/no question
    pub fn confirm(question: impl Into<String>) -> Self {
        Self {
            question_type: QuestionType::Confirm,
            ..Self::text(question)
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// The user's answer to one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnswer {
    pub question_id: String,
    /// Selected or typed values; multi-select answers may hold several
    pub values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_text: Option<String>,
}

impl QuestionAnswer {
    pub fn new<I, S>(question_id: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question_id: question_id.into(),
            values: values.into_iter().map(Into::into).collect(),
            custom_text: None,
        }
    }

    pub fn with_custom_text(mut self, text: impl Into<String>) -> Self {
        self.custom_text = Some(text.into());
        self
    }
}
