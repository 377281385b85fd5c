//! Image analysis endpoint (`POST /analyze`).

use std::path::Path;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use lookout_core::AnalysisResponse;
use lookout_logging::{AnalysisEvent, EventLogger};
use lookout_understanding::analyze_image;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::error::ApiError;
use crate::server::GatewayState;

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub custom_items: Option<Vec<String>>,
}

/// Handler for `POST /analyze`.
pub async fn analyze(
    State(state): State<GatewayState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection, "Rejected analyze payload");
            return Err(ApiError::bad_request(rejection.body_text()));
        }
    };

    let request_id = Uuid::new_v4().to_string();
    let image_path = request.image_path.unwrap_or_default();
    let model = request
        .model
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| state.default_model.clone());
    let targets = request.custom_items.unwrap_or_default();

    EventLogger::log_event(
        &request_id,
        AnalysisEvent::Requested {
            image_path: image_path.clone(),
            model: model.clone(),
            targets: targets.len(),
        },
    );

    match analyze_image(state.model.as_ref(), Path::new(&image_path), &model, &targets).await {
        Ok(response) => {
            EventLogger::log_event(
                &request_id,
                AnalysisEvent::Completed {
                    found: response.found.len(),
                    maybe_found: response.maybe_found.len(),
                    not_found: response.not_found.len(),
                },
            );
            Ok(Json(response))
        }
        Err(e) => {
            EventLogger::log_event(&request_id, AnalysisEvent::Failed { error_msg: e.to_string() });
            Err(ApiError::from(e))
        }
    }
}
