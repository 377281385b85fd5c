//! Image upload endpoint (`POST /upload`).

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use lookout_core::LookoutError;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::server::GatewayState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub filepath: String,
}

fn multipart_error(e: MultipartError) -> ApiError {
    warn!(error = %e, "Multipart read error");
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, "File too large")
    } else {
        ApiError::bad_request(format!("Failed to read multipart data: {}", e.body_text()))
    }
}

/// Handler for `POST /upload`: store the multipart `file` field.
pub async fn upload_image(
    State(state): State<GatewayState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let Ok(mut multipart) = multipart else {
        return Err(LookoutError::MissingFile.into());
    };

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(multipart_error)?;
        info!(filename = %filename, bytes = data.len(), "Received upload");

        let stored = state.uploads.save(&filename, &data).await?;
        return Ok(Json(UploadResponse {
            message: "Image uploaded successfully".to_string(),
            filepath: stored.path.display().to_string(),
        }));
    }

    Err(LookoutError::MissingFile.into())
}
