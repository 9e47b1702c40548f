//! Tests for the ask_user tool

use askbridge_core::bridge::{AnswerHandler, QuestionAsked, QuestionBridge, RejectNotice, RequestHandler};
use askbridge_core::error::{AskError, AskResult};
use askbridge_core::pending::{PendingRequestRegistry, RejectReason};
use askbridge_core::question::{AskUserInput, Question, QuestionAnswer};
use askbridge_core::tools::{Tool, ToolCall};
use mockall::mock;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

use super::operation::assign_question_ids;
use super::{AskUserTool, ask_user, generate_request_id};

mock! {
    pub Bridge {}

    impl QuestionBridge for Bridge {
        fn send_question(&self, question: &QuestionAsked) -> AskResult<()>;
        fn on_answer(&self, handler: AnswerHandler);
        fn on_cancel(&self, handler: RequestHandler);
        fn on_render_confirmed(&self, handler: RequestHandler);
        fn on_session_stop(&self, handler: RequestHandler);
        fn notify_rejected(&self, notice: &RejectNotice);
    }
}

/// Bridge that forwards every dispatched question to the returned receiver
fn capturing_bridge(times: usize) -> (MockBridge, mpsc::UnboundedReceiver<QuestionAsked>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut bridge = MockBridge::new();
    bridge
        .expect_send_question()
        .times(times)
        .returning(move |question| {
            let _ = tx.send(question.clone());
            Ok(())
        });
    (bridge, rx)
}

fn create_tool_call(id: &str, args: serde_json::Value) -> ToolCall {
    let arguments = if let serde_json::Value::Object(map) = args {
        map.into_iter().collect()
    } else {
        HashMap::new()
    };
    ToolCall::new(id, "ask_user", arguments)
}

#[test]
fn test_generate_request_id_format() {
    let id = generate_request_id();
    let parts: Vec<&str> = id.splitn(3, '_').collect();
    assert_eq!(parts[0], "req");
    assert!(parts[1].parse::<i64>().is_ok());
    assert_eq!(parts[2].len(), 32);
    assert_ne!(id, generate_request_id());
}

#[test]
fn test_assign_question_ids_keeps_supplied_ids() {
    let questions = vec![
        Question::text("first"),
        Question::confirm("second").with_id("keep-me"),
        Question::text("third").with_id(""),
    ];
    let questions = assign_question_ids("req_1_abc", questions);
    let ids: Vec<_> = questions.iter().map(|q| q.id.clone().unwrap()).collect();
    assert_eq!(ids, vec!["req_1_abc_0", "keep-me", "req_1_abc_2"]);
}

#[tokio::test]
async fn test_answered_after_render_confirmation() {
    let (bridge, mut sent) = capturing_bridge(1);
    let bridge = Arc::new(bridge);
    let registry = PendingRequestRegistry::new();

    let input = AskUserInput::new(vec![Question::text("Is this a test?")]).with_title("Test");
    let task = {
        let registry = registry.clone();
        tokio::spawn(async move { ask_user(input, bridge.as_ref(), &registry).await })
    };

    let asked = sent.recv().await.unwrap();
    assert!(asked.request_id.starts_with("req_"));
    assert_eq!(asked.title.as_deref(), Some("Test"));
    let question_id = asked.questions[0].id.clone().unwrap();
    assert_eq!(question_id, format!("{}_0", asked.request_id));

    assert!(registry.confirm_render(&asked.request_id));
    assert!(registry.resolve(
        &asked.request_id,
        vec![QuestionAnswer::new(question_id.clone(), ["yes"])]
    ));

    let out = task.await.unwrap();
    assert!(out.answered);
    assert!(out.render_confirmed);
    assert!(!out.should_retry);
    assert_eq!(out.retry_reason, None);
    assert_eq!(out.answers[0].question_id, question_id);
    assert_eq!(out.answers[0].values, vec!["yes"]);
    assert!(registry.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_render_never_confirmed_exhausts_retries() {
    let (bridge, mut sent) = capturing_bridge(3);
    let registry = PendingRequestRegistry::new();
    let start = Instant::now();

    let input = AskUserInput::new(vec![Question::text("Anyone there?")]).with_max_retries(3);
    let out = ask_user(input, &bridge, &registry).await;

    assert!(!out.answered && !out.cancelled && !out.timed_out);
    assert!(!out.should_retry);
    assert!(!out.render_confirmed);
    assert_eq!(out.retry_reason.as_deref(), Some("Max retries (3) exceeded"));
    assert!(start.elapsed() >= Duration::from_secs(90));
    assert!(registry.is_empty());

    let first = sent.recv().await.unwrap();
    for _ in 0..2 {
        assert_eq!(sent.recv().await.unwrap().request_id, first.request_id);
    }
}

#[tokio::test(start_paused = true)]
async fn test_retry_then_answer_reuses_request_id() {
    let (bridge, mut sent) = capturing_bridge(2);
    let bridge = Arc::new(bridge);
    let registry = PendingRequestRegistry::new();

    let input = AskUserInput::new(vec![Question::select("Pick one", ["a", "b"])]);
    let task = {
        let registry = registry.clone();
        tokio::spawn(async move { ask_user(input, bridge.as_ref(), &registry).await })
    };

    let first = sent.recv().await.unwrap();
    let second = sent.recv().await.unwrap();
    assert_eq!(first.request_id, second.request_id);
    assert_eq!(first.questions, second.questions);
    assert_eq!(registry.get(&second.request_id).unwrap().retry_count, 1);

    assert!(registry.confirm_render(&second.request_id));
    assert!(registry.resolve(
        &second.request_id,
        vec![QuestionAnswer::new(format!("{}_0", second.request_id), ["b"])]
    ));

    let out = task.await.unwrap();
    assert!(out.answered);
    assert!(out.render_confirmed);
    assert!(!out.should_retry);
}

#[tokio::test(start_paused = true)]
async fn test_send_failure_degrades_to_render_timeout() {
    let mut bridge = MockBridge::new();
    bridge
        .expect_send_question()
        .times(1)
        .returning(|_| Err(AskError::bridge("UI host not connected")));
    let registry = PendingRequestRegistry::new();
    let start = Instant::now();

    let input = AskUserInput::new(vec![Question::text("Hello?")])
        .with_max_retries(0)
        .with_render_timeout_ms(10_000);
    let out = ask_user(input, &bridge, &registry).await;

    assert!(!out.answered);
    assert!(!out.should_retry);
    assert_eq!(out.retry_reason.as_deref(), Some("Max retries (0) exceeded"));
    assert!(start.elapsed() >= Duration::from_secs(10));
    assert!(start.elapsed() < Duration::from_secs(11));
}

#[tokio::test(start_paused = true)]
async fn test_out_of_range_settings_are_clamped() {
    let (bridge, _sent) = capturing_bridge(1);
    let registry = PendingRequestRegistry::new();
    let start = Instant::now();

    let input = AskUserInput::new(vec![Question::text("Quick?")])
        .with_max_retries(0)
        .with_render_timeout_ms(1);
    let out = ask_user(input, &bridge, &registry).await;

    assert!(out.retry_reason.is_some());
    assert!(start.elapsed() >= Duration::from_secs(10));
    assert!(start.elapsed() < Duration::from_secs(11));
}

#[tokio::test]
async fn test_cancel_reports_cancelled() {
    let (bridge, mut sent) = capturing_bridge(1);
    let bridge = Arc::new(bridge);
    let registry = PendingRequestRegistry::new();

    let input = AskUserInput::new(vec![Question::confirm("Proceed?")]);
    let task = {
        let registry = registry.clone();
        tokio::spawn(async move { ask_user(input, bridge.as_ref(), &registry).await })
    };

    let asked = sent.recv().await.unwrap();
    assert!(registry.confirm_render(&asked.request_id));
    assert!(registry.reject(&asked.request_id, RejectReason::Cancelled));

    let out = task.await.unwrap();
    assert!(out.cancelled);
    assert!(!out.answered);
    assert!(out.render_confirmed);
    assert!(out.answers.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_answer_deadline_after_confirmation() {
    let (bridge, mut sent) = capturing_bridge(1);
    let bridge = Arc::new(bridge);
    let registry = PendingRequestRegistry::with_answer_timeout(Duration::from_secs(300));

    let input = AskUserInput::new(vec![Question::text("Still there?")]);
    let task = {
        let registry = registry.clone();
        tokio::spawn(async move { ask_user(input, bridge.as_ref(), &registry).await })
    };

    let asked = sent.recv().await.unwrap();
    assert!(registry.confirm_render(&asked.request_id));

    let out = task.await.unwrap();
    assert!(out.timed_out);
    assert!(out.render_confirmed);
    assert!(!out.should_retry);
    assert_eq!(out.retry_reason, None);
}

#[tokio::test]
async fn test_invalid_question_sets_are_never_registered() {
    let mut bridge = MockBridge::new();
    bridge.expect_send_question().never();
    let registry = PendingRequestRegistry::new();

    let empty = AskUserInput::new(vec![]);
    let out = ask_user(empty, &bridge, &registry).await;
    assert!(!out.answered && !out.cancelled && !out.timed_out);
    assert!(!out.should_retry);
    assert!(registry.is_empty());

    let no_options = AskUserInput::new(vec![Question::select("Which one?", Vec::<String>::new())]);
    let out = ask_user(no_options, &bridge, &registry).await;
    assert!(!out.answered);
    assert!(registry.is_empty());

    let too_many = AskUserInput::new((0..11).map(|i| Question::text(format!("Q{i}"))).collect());
    let out = ask_user(too_many, &bridge, &registry).await;
    assert!(!out.answered);
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_closed_registry_settles_without_dispatch() {
    let mut bridge = MockBridge::new();
    bridge.expect_send_question().never();
    let registry = PendingRequestRegistry::new();
    registry.close(RejectReason::ShuttingDown);

    let input = AskUserInput::new(vec![Question::confirm("Still running?")]);
    let out = tokio::time::timeout(Duration::from_secs(1), ask_user(input, &bridge, &registry))
        .await
        .expect("ask_user should settle immediately on a closed registry");

    assert!(!out.answered && !out.cancelled && !out.timed_out);
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_tool_rejects_invalid_arguments_without_dispatch() {
    let mut bridge = MockBridge::new();
    bridge.expect_send_question().never();
    let registry = PendingRequestRegistry::new();
    let tool = AskUserTool::new(Arc::new(bridge), registry.clone());

    let call = create_tool_call(
        "call-1",
        json!({
            "questions": [{ "question": "Too many retries?" }],
            "maxRetries": 9
        }),
    );
    let result = tool.execute(&call).await.unwrap();

    assert!(!result.success);
    assert!(result.error.as_deref().unwrap().contains("maxRetries"));
    let payload: serde_json::Value = serde_json::from_str(result.output.as_deref().unwrap()).unwrap();
    assert_eq!(payload["answered"], false);
    assert_eq!(payload["cancelled"], false);
    assert_eq!(payload["timedOut"], false);
    assert_eq!(payload["answers"], json!([]));
    assert!(payload["error"].as_str().unwrap().contains("maxRetries"));
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_tool_rejects_select_without_options() {
    let mut bridge = MockBridge::new();
    bridge.expect_send_question().never();
    let tool = AskUserTool::new(Arc::new(bridge), PendingRequestRegistry::new());

    let call = create_tool_call(
        "call-2",
        json!({ "questions": [{ "question": "Which one?", "type": "select" }] }),
    );
    let result = tool.execute_with_timing(&call).await;

    assert!(!result.success);
    assert!(result.output.is_some());
    assert!(result.execution_time_ms.is_some());
}

#[tokio::test]
async fn test_tool_returns_serialized_result() {
    let (bridge, mut sent) = capturing_bridge(1);
    let registry = PendingRequestRegistry::new();
    let tool = AskUserTool::new(Arc::new(bridge), registry.clone());

    let call = create_tool_call(
        "call-3",
        json!({
            "questions": [{ "question": "Favourite colour?", "type": "text" }],
            "title": "Survey",
            "renderTimeout": 15000
        }),
    );

    let responder = tokio::spawn(async move {
        let asked = sent.recv().await.unwrap();
        registry.confirm_render(&asked.request_id);
        registry.resolve(
            &asked.request_id,
            vec![QuestionAnswer::new(format!("{}_0", asked.request_id), ["green"])
                .with_custom_text("sea green")],
        );
    });

    let result = tool.execute(&call).await.unwrap();
    responder.await.unwrap();

    assert!(result.success);
    let payload: serde_json::Value = serde_json::from_str(result.output.as_deref().unwrap()).unwrap();
    assert_eq!(payload["answered"], true);
    assert_eq!(payload["shouldRetry"], false);
    assert_eq!(payload["retryReason"], serde_json::Value::Null);
    assert_eq!(payload["renderConfirmed"], true);
    assert_eq!(payload["answers"][0]["values"][0], "green");
    assert_eq!(payload["answers"][0]["customText"], "sea green");
    assert_eq!(result.metadata["answered"], true);
}

#[test]
fn test_tool_metadata() {
    let tool = AskUserTool::new(Arc::new(MockBridge::new()), PendingRequestRegistry::new());
    assert_eq!(tool.name(), "ask_user");
    assert!(tool.requires_user_interaction());
    assert_eq!(tool.max_execution_duration(), None);

    let schema = tool.schema();
    assert_eq!(schema.name, "ask_user");
    assert_eq!(schema.parameters["required"], json!(["questions"]));
    assert_eq!(schema.parameters["properties"]["questions"]["maxItems"], 10);
    assert_eq!(schema.parameters["properties"]["maxRetries"]["maximum"], 5);
    assert_eq!(schema.parameters["properties"]["renderTimeout"]["minimum"], 10000);
    assert_eq!(schema.parameters["properties"]["title"]["maxLength"], 100);
}
