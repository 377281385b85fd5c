//! HTTP mapping for backend errors.
//!
//! Every failure leaves the gateway as `{"error": "..."}` with a status code
//! chosen by error kind.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lookout_core::LookoutError;
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<LookoutError> for ApiError {
    fn from(err: LookoutError) -> Self {
        if err.is_client_error() {
            return Self::bad_request(err.to_string());
        }
        match err {
            LookoutError::ImageVanished => {
                Self::new(StatusCode::NOT_FOUND, LookoutError::ImageVanished.to_string())
            }
            e if e.is_model_service() => {
                error!(error = %e, "Vision model request failed");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to connect to Ollama or process image: {e}"),
                )
            }
            e => {
                error!(error = %e, "An unexpected error occurred");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("An unexpected error occurred: {e}"),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
