use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::gateway::error::GatewayError;
use crate::gateway::payload::{
    DeleteResult, PCheckResponse, RegisterRequestBody, RegistrationEntry, ResponseStatus,
};
use crate::gateway::state::HandlerState;
use crate::gateway::{PCHECK_STATUS_FAILURE, PCHECK_STATUS_HEADER, PCHECK_STATUS_SUCCESS};

/// `GET /policycheck/{policy_id}/{*content}`
#[instrument(skip_all, fields(policy_id = tracing::field::Empty))]
pub async fn check_policy_handler(
    State(state): State<HandlerState>,
    Path((policy_id, content)): Path<(String, String)>,
) -> Result<Response, GatewayError> {
    tracing::Span::current().record("policy_id", policy_id.as_str());

    let result = state.service.check_content(&policy_id, &content).await?;
    debug!(distance = result.calculated_distance, "Check complete");

    Ok(make_response(
        StatusCode::OK,
        PCheckResponse::success(result),
    ))
}

/// `PUT /policycheck`
#[instrument(skip_all, fields(count = tracing::field::Empty))]
pub async fn register_policies_handler(
    State(state): State<HandlerState>,
    body: Bytes,
) -> Result<Response, GatewayError> {
    let body: RegisterRequestBody = serde_json::from_slice(&body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;
    tracing::Span::current().record("count", body.requests.len());

    let outcomes = state.service.register_policies(&body.requests).await;
    let entries: Vec<RegistrationEntry> = body
        .requests
        .iter()
        .zip(outcomes.iter())
        .map(|(request, outcome)| RegistrationEntry::from_outcome(request, outcome))
        .collect();

    let errors: Vec<String> = entries.iter().filter_map(|e| e.error.clone()).collect();
    info!(
        registered = entries.len() - errors.len(),
        failed = errors.len(),
        "Registration batch complete"
    );

    let response = PCheckResponse {
        status: if errors.is_empty() {
            ResponseStatus::Success
        } else {
            ResponseStatus::Failure
        },
        error: errors,
        result: Some(entries),
    };
    Ok(make_response(StatusCode::OK, response))
}

/// `DELETE /policycheck/{policy_id}`
#[instrument(skip(state))]
pub async fn delete_policy_handler(
    State(state): State<HandlerState>,
    Path(policy_id): Path<String>,
) -> Response {
    let deleted = state.service.delete_policy(&policy_id);
    make_response(StatusCode::OK, PCheckResponse::success(DeleteResult { deleted }))
}

pub(crate) fn make_response<T: Serialize>(status: StatusCode, body: PCheckResponse<T>) -> Response {
    let status_value = match body.status {
        ResponseStatus::Success => PCHECK_STATUS_SUCCESS,
        ResponseStatus::Failure => PCHECK_STATUS_FAILURE,
    };

    let mut headers = HeaderMap::new();
    headers.insert(PCHECK_STATUS_HEADER, HeaderValue::from_static(status_value));

    (status, headers, Json(body)).into_response()
}
