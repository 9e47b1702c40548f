//! Relay message definitions
//!
//! One JSON object per line, discriminated by `type`.

use crate::bridge::{QuestionAsked, RejectNotice};
use crate::question::{Question, QuestionAnswer};
use serde::{Deserialize, Serialize};

/// Value of `source` on outgoing questions
pub const QUESTION_SOURCE: &str = "mcp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RelayMessage {
    /// Server to UI: show these questions
    #[serde(rename_all = "camelCase")]
    QuestionAsked {
        request_id: String,
        questions: Vec<Question>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        source: String,
    },

    /// Server to UI: the request ended, remove its dialog
    #[serde(rename_all = "camelCase")]
    Rejected {
        request_id: String,
        reason: String,
        timed_out: bool,
        cancelled: bool,
    },

    /// UI to server: the user answered
    #[serde(rename_all = "camelCase")]
    Answer {
        request_id: String,
        answers: Vec<QuestionAnswer>,
    },

    /// UI to server: the user dismissed the question
    #[serde(rename_all = "camelCase")]
    Cancel { request_id: String },

    /// UI to server: the question is on screen
    #[serde(rename_all = "camelCase")]
    RenderConfirmed { request_id: String },

    /// UI to server: the window showing this request was torn down
    #[serde(rename_all = "camelCase")]
    SessionStop { request_id: String },
}

impl RelayMessage {
    /// Parse a message from one JSON line
    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line.trim())
    }

    /// Serialize to a JSON line (with newline)
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        Ok(format!("{}\n", json))
    }

    pub fn request_id(&self) -> &str {
        match self {
            Self::QuestionAsked { request_id, .. }
            | Self::Rejected { request_id, .. }
            | Self::Answer { request_id, .. }
            | Self::Cancel { request_id }
            | Self::RenderConfirmed { request_id }
            | Self::SessionStop { request_id } => request_id,
        }
    }
}

impl From<&QuestionAsked> for RelayMessage {
    fn from(question: &QuestionAsked) -> Self {
        Self::QuestionAsked {
            request_id: question.request_id.clone(),
            questions: question.questions.clone(),
            title: question.title.clone(),
            source: QUESTION_SOURCE.to_string(),
        }
    }
}

impl From<&RejectNotice> for RelayMessage {
    fn from(notice: &RejectNotice) -> Self {
        Self::Rejected {
            request_id: notice.request_id.clone(),
            reason: notice.reason.clone(),
            timed_out: notice.timed_out,
            cancelled: notice.cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_question_asked_wire_format() {
        let asked = QuestionAsked {
            request_id: "req_1".to_string(),
            questions: vec![Question::text("Is this a test?").with_id("req_1_0")],
            title: Some("Check".to_string()),
        };
        let line = RelayMessage::from(&asked).to_json_line().unwrap();
        assert!(line.ends_with('\n'));

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "question-asked",
                "requestId": "req_1",
                "questions": [{"id": "req_1_0", "question": "Is this a test?", "type": "text", "required": true}],
                "title": "Check",
                "source": "mcp"
            })
        );
    }

    #[test]
    fn test_inbound_messages_parse() {
        let answer = RelayMessage::from_json_line(
            r#"{"type":"answer","requestId":"req_1","answers":[{"questionId":"req_1_0","values":["yes"]}]}"#,
        )
        .unwrap();
        assert_eq!(
            answer,
            RelayMessage::Answer {
                request_id: "req_1".to_string(),
                answers: vec![QuestionAnswer::new("req_1_0", ["yes"])],
            }
        );

        let confirmed =
            RelayMessage::from_json_line(r#"  {"type":"render-confirmed","requestId":"req_1"}  "#)
                .unwrap();
        assert_eq!(confirmed.request_id(), "req_1");

        let stop = RelayMessage::from_json_line(r#"{"type":"session-stop","requestId":"req_2"}"#)
            .unwrap();
        assert!(matches!(stop, RelayMessage::SessionStop { .. }));
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        assert!(RelayMessage::from_json_line(r#"{"type":"resize","requestId":"x"}"#).is_err());
        assert!(RelayMessage::from_json_line("not json").is_err());
    }

    #[test]
    fn test_rejected_wire_format() {
        let notice = RejectNotice {
            request_id: "req_3".to_string(),
            reason: "cancelled".to_string(),
            timed_out: false,
            cancelled: true,
        };
        let value = serde_json::to_value(RelayMessage::from(&notice)).unwrap();
        assert_eq!(
            value,
            json!({"type": "rejected", "requestId": "req_3", "reason": "cancelled", "timedOut": false, "cancelled": true})
        );
    }
}
