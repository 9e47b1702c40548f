//! One ask_user lifecycle from registration to terminal result

use askbridge_core::bridge::{QuestionAsked, QuestionBridge};
use askbridge_core::pending::{PendingRequest, PendingRequestRegistry};
use askbridge_core::question::{AskUserInput, AskUserOutput, Question, validate_input};
use chrono::Utc;
use tracing::{Span, error, info, instrument, warn};
use uuid::Uuid;

/// Fresh request id: `req_{unix_millis}_{random}`
pub fn generate_request_id() -> String {
    format!(
        "req_{}_{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    )
}

/// Give every question an id, keeping ids the caller supplied
pub(crate) fn assign_question_ids(request_id: &str, questions: Vec<Question>) -> Vec<Question> {
    questions
        .into_iter()
        .enumerate()
        .map(|(index, question)| {
            if question.id.as_deref().is_some_and(|id| !id.is_empty()) {
                question
            } else {
                question.with_id(format!("{}_{}", request_id, index))
            }
        })
        .collect()
}

/// Ask the user and wait for a terminal outcome.
///
/// Registers the request, pushes it through `bridge` and suspends until the
/// registry settles it. A render timeout with budget left re-sends the same
/// request id with the consumed retries carried over, so the value returned
/// here never has `should_retry` set. Out-of-range settings are clamped;
/// a question set that fails validation is never registered or dispatched.
///
/// Never fails: invalid input, transport trouble and registry misuse surface
/// as an unanswered result.
#[instrument(skip_all, fields(request_id))]
pub async fn ask_user(
    input: AskUserInput,
    bridge: &dyn QuestionBridge,
    registry: &PendingRequestRegistry,
) -> AskUserOutput {
    let input = input.normalized();
    if let Err(e) = validate_input(&input) {
        warn!(error = %e, "ask_user input rejected before dispatch");
        return AskUserOutput::unresolved(false);
    }

    let request_id = generate_request_id();
    Span::current().record("request_id", request_id.as_str());

    let questions = assign_question_ids(&request_id, input.questions);
    info!(
        questions = questions.len(),
        title = input.title.as_deref().unwrap_or(""),
        max_retries = input.max_retries,
        render_timeout_ms = input.render_timeout,
        "ask_user called"
    );

    let asked = QuestionAsked {
        request_id: request_id.clone(),
        questions,
        title: input.title,
    };
    let render_timeout = std::time::Duration::from_millis(input.render_timeout);
    let mut retry_count = 0;

    loop {
        let request = PendingRequest::new(&request_id, asked.questions.clone())
            .with_title(asked.title.clone())
            .with_max_retries(input.max_retries)
            .with_retry_count(retry_count)
            .with_render_timeout(render_timeout);

        let completion = match registry.add(request) {
            Ok(rx) => rx,
            Err(e) => {
                error!(error = %e, "could not register pending request");
                return AskUserOutput::unresolved(false);
            }
        };

        // The render timer is already armed, so a failed send ends up on the
        // render-timeout path instead of failing the call.
        if let Err(e) = bridge.send_question(&asked) {
            warn!(error = %e, attempt = retry_count + 1, "question dispatch failed");
        }

        let output = match completion.await {
            Ok(output) => output,
            Err(_) => {
                error!("pending request dropped without an outcome");
                return AskUserOutput::unresolved(false);
            }
        };

        if output.should_retry {
            retry_count += 1;
            info!(
                attempt = retry_count + 1,
                reason = output.retry_reason.as_deref().unwrap_or(""),
                "re-sending question"
            );
            continue;
        }

        info!(
            answered = output.answered,
            cancelled = output.cancelled,
            timed_out = output.timed_out,
            render_confirmed = output.render_confirmed,
            "ask_user finished"
        );
        return output;
    }
}
