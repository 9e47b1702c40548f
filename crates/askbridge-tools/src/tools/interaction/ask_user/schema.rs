//! Schema definition for the ask_user tool

use askbridge_core::config::timeouts::{render, retry};
use askbridge_core::question::validation::{MAX_QUESTIONS, MAX_QUESTION_CHARS, MAX_TITLE_CHARS, MIN_QUESTIONS};
use askbridge_core::tools::ToolSchema;
use serde_json::json;

/// Creates the JSON schema for the ask_user tool
pub fn create_schema(name: &str, description: &str) -> ToolSchema {
    ToolSchema {
        name: name.to_string(),
        description: description.to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "questions": {
                    "type": "array",
                    "description": "Questions to show the user, in display order",
                    "minItems": MIN_QUESTIONS,
                    "maxItems": MAX_QUESTIONS,
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "string",
                                "description": "Optional stable id; generated when omitted"
                            },
                            "question": {
                                "type": "string",
                                "description": "The question text",
                                "minLength": 1,
                                "maxLength": MAX_QUESTION_CHARS
                            },
                            "type": {
                                "type": "string",
                                "enum": ["text", "select", "multi-select", "confirm"],
                                "default": "text"
                            },
                            "options": {
                                "type": "array",
                                "description": "Choices for select and multi-select questions",
                                "items": { "type": "string" }
                            },
                            "required": {
                                "type": "boolean",
                                "default": true
                            },
                            "placeholder": {
                                "type": "string"
                            }
                        },
                        "required": ["question"]
                    }
                },
                "title": {
                    "type": "string",
                    "description": "Optional title for the question dialog",
                    "maxLength": MAX_TITLE_CHARS
                },
                "maxRetries": {
                    "type": "integer",
                    "description": "How many times to re-send the question if the UI does not confirm it was shown",
                    "minimum": 0,
                    "maximum": retry::MAX_RETRIES,
                    "default": retry::DEFAULT_MAX_RETRIES
                },
                "renderTimeout": {
                    "type": "integer",
                    "description": "Milliseconds the UI has to confirm the question is on screen",
                    "minimum": render::MIN_MS,
                    "maximum": render::MAX_MS,
                    "default": render::DEFAULT_MS
                }
            },
            "required": ["questions"]
        }),
    }
}
