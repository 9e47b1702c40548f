//! axum routes: JSON-RPC endpoint, health check, CORS

use askbridge_core::mcp::McpServerHandler;
use askbridge_core::pending::PendingRequestRegistry;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<McpServerHandler>,
    pub registry: PendingRequestRegistry,
    pub port: u16,
}

/// Build the MCP axum router.
///
/// MCP clients connect at the root, so `/` and `/mcp` are the same endpoint.
pub fn mcp_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health).options(preflight))
        .route("/", post(rpc).options(preflight))
        .route("/mcp", post(rpc).options(preflight))
        .layer(middleware::map_response(with_cors))
        .with_state(state)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    port: u16,
    pending_requests: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "running",
        port: state.port,
        pending_requests: state.registry.count(),
    })
}

/// Notifications get 202 with no body
async fn rpc(State(state): State<AppState>, body: Bytes) -> Response {
    match state.handler.handle_json(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

async fn preflight() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("86400"))],
    )
}

async fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization, Accept"),
    );
    response
}
