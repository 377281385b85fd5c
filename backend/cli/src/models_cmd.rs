//! CLI Models Command
//!
//! Lists models on the model service, with the same fallback as `GET /models`.

use anyhow::Result;
use lookout_core::VisionModel;
use lookout_gateway::fetch_model_listing;

pub async fn run(model: &dyn VisionModel) -> Result<()> {
    let (status, listing) = fetch_model_listing(model).await;

    println!("\nAvailable models ({})\n", status.as_u16());
    for name in &listing.models {
        println!("  - {name}");
    }
    if let Some(warning) = &listing.warning {
        println!("\nwarning: {warning}");
    }
    if let Some(error) = &listing.error {
        println!("\nerror: {error}");
    }
    println!();

    Ok(())
}
