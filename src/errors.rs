use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::InvalidRecordError;
use crate::providers::ProviderError;

/// Request-boundary error. Serializes as `{"error": message}` with the
/// matching status code; collaborator failures all map to 500. Error messages
/// are exposed in the body, which is acceptable for an internal dashboard
/// backend.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        tracing::error!("Provider error: {err}");
        Self::internal(err.to_string())
    }
}

impl From<InvalidRecordError> for AppError {
    fn from(err: InvalidRecordError) -> Self {
        tracing::error!("Billing record error: {err}");
        Self::internal(err.to_string())
    }
}
