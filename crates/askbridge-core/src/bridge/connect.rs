//! Wiring inbound bridge events to the registry

use super::types::{QuestionBridge, RejectNotice};
use crate::pending::{PendingRequestRegistry, RejectReason};
use std::sync::{Arc, Weak};
use tracing::{debug, info};

/// Register handlers on `bridge` that drive `registry`.
///
/// Cancels and session stops that actually end a request are echoed back to
/// the UI through `notify_rejected`, and every settled request is passed to
/// `forget`. Handlers keep only a weak reference to the bridge, which owns them.
pub fn connect_bridge(bridge: Arc<dyn QuestionBridge>, registry: PendingRequestRegistry) {
    let weak: Weak<dyn QuestionBridge> = Arc::downgrade(&bridge);

    let bridge_ref = weak.clone();
    registry.on_settled(Box::new(move |request_id| {
        if let Some(bridge) = bridge_ref.upgrade() {
            bridge.forget(request_id);
        }
    }));

    let answers = registry.clone();
    bridge.on_answer(Box::new(move |request_id, values| {
        if answers.resolve(request_id, values) {
            info!(request_id, "answer delivered to waiting caller");
        } else {
            debug!(request_id, "answer for unknown or finished request ignored");
        }
    }));

    let cancels = registry.clone();
    let bridge_ref = weak.clone();
    bridge.on_cancel(Box::new(move |request_id| {
        reject_and_notify(&cancels, &bridge_ref, request_id, RejectReason::Cancelled);
    }));

    let confirms = registry.clone();
    bridge.on_render_confirmed(Box::new(move |request_id| {
        if !confirms.confirm_render(request_id) {
            debug!(request_id, "render confirmation for unknown request ignored");
        }
    }));

    let stops = registry;
    let bridge_ref = weak;
    bridge.on_session_stop(Box::new(move |request_id| {
        reject_and_notify(&stops, &bridge_ref, request_id, RejectReason::WindowClosed);
    }));
}

fn reject_and_notify(
    registry: &PendingRequestRegistry,
    bridge: &Weak<dyn QuestionBridge>,
    request_id: &str,
    reason: RejectReason,
) {
    if !registry.reject(request_id, reason) {
        debug!(request_id, %reason, "event for unknown or finished request ignored");
        return;
    }
    if let Some(bridge) = bridge.upgrade() {
        bridge.notify_rejected(&RejectNotice::new(request_id, &reason));
    }
}
