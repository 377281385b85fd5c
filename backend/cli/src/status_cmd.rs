//! CLI Status Command
//!
//! Reports whether a Lookout server is answering on the configured port.

use anyhow::Result;
use lookout_config::LookoutConfig;

pub async fn run(config: &LookoutConfig) -> Result<()> {
    let host = match config.server.bind_address.as_str() {
        "0.0.0.0" | "" => "127.0.0.1",
        other => other,
    };
    let url = format!("http://{host}:{}/api/health", config.server.port);

    println!("Lookout status: checking {url}...");
    let client = reqwest::Client::new();
    match client.get(&url).send().await {
        Ok(resp) => {
            let body: serde_json::Value = resp.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Err(_) => {
            println!("Lookout is not running on port {}", config.server.port);
        }
    }

    Ok(())
}
