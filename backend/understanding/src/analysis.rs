//! Image analysis: ask a vision model which items it can spot.
//!
//! Reads the image, base64-encodes it, sends it with the item-spotting
//! prompt, and parses the reply into categories.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use lookout_core::{AnalysisResponse, LookoutError, VisionModel, VisionRequest};
use tracing::{debug, info};

use crate::parser::parse_response;
use crate::prompt::build_prompt;

/// Analyze the image at `image_path` with `model_id`, looking for `targets`.
pub async fn analyze_image(
    model: &dyn VisionModel,
    image_path: &Path,
    model_id: &str,
    targets: &[String],
) -> Result<AnalysisResponse, LookoutError> {
    if image_path.as_os_str().is_empty() {
        return Err(LookoutError::InvalidImagePath);
    }
    if !tokio::fs::try_exists(image_path).await.unwrap_or(false) {
        return Err(LookoutError::InvalidImagePath);
    }

    let image_bytes = tokio::fs::read(image_path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LookoutError::ImageVanished,
        _ => LookoutError::StorageError(format!(
            "failed to read {}: {e}",
            image_path.display()
        )),
    })?;

    let prompt = build_prompt(targets);
    let request = VisionRequest {
        model: model_id.to_string(),
        prompt,
        images: vec![STANDARD.encode(&image_bytes)],
    };

    info!(
        provider = model.name(),
        model = model_id,
        image = %image_path.display(),
        bytes = image_bytes.len(),
        "Sending image to vision model"
    );
    debug!(prompt = %request.prompt, "Prompt sent to vision model");

    let response = model.generate(&request).await?;
    info!(latency_ms = response.latency_ms, "Vision model replied");

    let parsed = parse_response(&response.content, targets);
    Ok(AnalysisResponse::assemble(targets, parsed, response.content))
}
