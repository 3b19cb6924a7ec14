//! HTTP gateway (Axum) for policy registration, checks and deletion.
//!
//! This module is primarily used by the `pcheck` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{delete, get, put},
};
use tower_http::trace::TraceLayer;

pub use handler::{check_policy_handler, delete_policy_handler, register_policies_handler};
pub use state::HandlerState;

/// Response header carrying a short machine-readable outcome.
pub const PCHECK_STATUS_HEADER: &str = "x-pcheck-status";
pub const PCHECK_STATUS_HEALTHY: &str = "healthy";
pub const PCHECK_STATUS_READY: &str = "ready";
pub const PCHECK_STATUS_SUCCESS: &str = "success";
pub const PCHECK_STATUS_FAILURE: &str = "failure";

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/policycheck", put(register_policies_handler))
        .route("/policycheck/{policy_id}", delete(delete_policy_handler))
        .route(
            "/policycheck/{policy_id}/{*content}",
            get(check_policy_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub policies: usize,
    pub embedder: &'static str,
    pub embedder_mode: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        PCHECK_STATUS_HEADER,
        HeaderValue::from_static(PCHECK_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let embedder = state.service.embedder();
    let embedder_mode = if embedder.is_stub() { "stub" } else { "real" };

    let mut headers = HeaderMap::new();
    headers.insert(
        PCHECK_STATUS_HEADER,
        HeaderValue::from_static(PCHECK_STATUS_READY),
    );

    (
        StatusCode::OK,
        headers,
        Json(ReadyResponse {
            status: "ok",
            policies: state.service.policy_count(),
            embedder: embedder.name(),
            embedder_mode,
        }),
    )
        .into_response()
}
