use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use pcheck::{ComplianceError, ErrorKind};

use super::PCHECK_STATUS_HEADER;
use super::payload::PCheckResponse;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Compliance(#[from] ComplianceError),
}

impl GatewayError {
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::Compliance(err) => {
                let code = match err.kind() {
                    ErrorKind::NotFound => StatusCode::NOT_FOUND,
                    ErrorKind::EmbeddingFailure => StatusCode::BAD_GATEWAY,
                    ErrorKind::Validation => StatusCode::BAD_REQUEST,
                    ErrorKind::DataIntegrity => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (code, err.kind().as_str())
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, pcheck_status) = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let mut headers = HeaderMap::new();
        headers.insert(PCHECK_STATUS_HEADER, HeaderValue::from_static(pcheck_status));

        let body = Json(PCheckResponse::<()>::failure(vec![self.to_string()]));

        (status, headers, body).into_response()
    }
}
