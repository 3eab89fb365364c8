// Mapping of entry errors onto HTTP responses
use crate::application::errors::EntryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

impl EntryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntryError::Validation(_) | EntryError::InvalidDate { .. } => StatusCode::BAD_REQUEST,
            EntryError::NotFound(_) | EntryError::UnknownId(_) => StatusCode::NOT_FOUND,
            EntryError::UnexpectedPayload(_) => StatusCode::BAD_GATEWAY,
            EntryError::Fetch | EntryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EntryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {:#}", self);
        }

        // Storage details stay in the log
        let message = match &self {
            EntryError::Storage(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
