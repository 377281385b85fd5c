mod analyze_cmd;
mod models_cmd;
mod status_cmd;

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use lookout_config::{config_file_path, load_and_prepare, LookoutConfig};
use lookout_gateway::{start_server, GatewayState};
use lookout_logging::init_logger;
use lookout_providers::OllamaProvider;

#[derive(Parser)]
#[command(name = "lookout")]
#[command(about = "Lookout: spot items in photos with a local vision model")]
#[command(version)]
struct Cli {
    /// Path to the YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the upload/analysis HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Analyze a local image and print the result as JSON
    Analyze {
        /// Image file to analyze
        image: PathBuf,
        /// Vision model to use (defaults to the configured model)
        #[arg(short, long)]
        model: Option<String>,
        /// Item to look for; repeat for several
        #[arg(short, long = "item")]
        items: Vec<String>,
    },
    /// List models available on the model service
    Models,
    /// Query a running server's health endpoint
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = cli.config.clone().unwrap_or_else(config_file_path);
    let config = load_and_prepare(&path).await?;
    let _guard = init_logger(config.logging.dir.as_deref(), &config.logging.level);

    match cli.command {
        Commands::Serve { port } => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            run_server(config).await?;
        }
        Commands::Analyze { image, model, items } => {
            let provider = provider_from(&config);
            let model = model.unwrap_or_else(|| config.ollama.default_model.clone());
            analyze_cmd::run(&provider, &image, &model, &items).await?;
        }
        Commands::Models => models_cmd::run(&provider_from(&config)).await?,
        Commands::Status => status_cmd::run(&config).await?,
    }

    Ok(())
}

fn provider_from(config: &LookoutConfig) -> OllamaProvider {
    OllamaProvider::new()
        .with_generate_url(config.ollama.generate_url.clone())
        .with_tags_url(config.ollama.tags_url.clone())
        .with_list_timeout(config.ollama.list_timeout())
        .with_request_timeout(config.ollama.request_timeout())
}

async fn run_server(config: LookoutConfig) -> Result<()> {
    info!(
        port = config.server.port,
        bind = %config.server.bind_address,
        uploads = %config.uploads.dir.display(),
        model = %config.ollama.default_model,
        "Starting Lookout server"
    );

    let state = GatewayState::from_config(&config, Arc::new(provider_from(&config)));
    start_server(&config.server.bind_address, config.server.port, state).await
}
