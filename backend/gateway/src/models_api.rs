//! Model listing endpoint (`GET /models`).
//!
//! Proxies the model service's list. When the service is slow, down, or
//! reports nothing, callers still get a usable list with the default model.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lookout_core::{LookoutError, VisionModel, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::server::GatewayState;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelsResponse {
    pub models: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Ask the model service for its models, degrading to the default on failure.
pub async fn fetch_model_listing(model: &dyn VisionModel) -> (StatusCode, ModelsResponse) {
    let fallback = || vec![DEFAULT_MODEL.to_string()];

    match model.list_models().await {
        Ok(models) if !models.is_empty() => (
            StatusCode::OK,
            ModelsResponse { models, warning: None, error: None },
        ),
        Ok(_) => {
            warn!("Model service returned no models or an unexpected format");
            (
                StatusCode::OK,
                ModelsResponse {
                    models: fallback(),
                    warning: Some("Ollama reported no models. Using default.".to_string()),
                    error: None,
                },
            )
        }
        Err(LookoutError::ModelTimeout { url }) => {
            error!(url = %url, "Timeout connecting to model service to list models");
            (
                StatusCode::GATEWAY_TIMEOUT,
                ModelsResponse {
                    models: fallback(),
                    warning: None,
                    error: Some(
                        "Timeout connecting to Ollama to list models. Using default.".to_string(),
                    ),
                },
            )
        }
        Err(e) => {
            error!(error = %e, "Could not connect to model service to list models");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ModelsResponse {
                    models: fallback(),
                    warning: None,
                    error: Some(format!(
                        "Could not connect to Ollama to list models ({e}). Using default."
                    )),
                },
            )
        }
    }
}

/// Handler for `GET /models`.
pub async fn list_models(State(state): State<GatewayState>) -> Response {
    let (status, body) = fetch_model_listing(state.model.as_ref()).await;
    (status, Json(body)).into_response()
}
