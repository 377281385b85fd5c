//! CLI Analyze Command
//!
//! Runs one analysis against a local file and prints the JSON result.

use std::path::Path;

use anyhow::Result;
use lookout_core::VisionModel;
use lookout_understanding::analyze_image;

pub async fn run(model: &dyn VisionModel, image: &Path, model_id: &str, items: &[String]) -> Result<()> {
    let response = analyze_image(model, image, model_id, items).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
