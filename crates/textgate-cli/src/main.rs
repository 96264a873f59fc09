//! Command-line entry point for the textgate gateway.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use textgate::GatewayConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "textgate",
    version,
    about = "OCR upload gateway: web UI and proxy for a remote dots.ocr backend"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Host address to bind to (falls back to TEXTGATE_HOST, then 127.0.0.1)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to listen on (falls back to TEXTGATE_PORT, then 7860)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to a textgate.toml configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn resolve_host(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var("TEXTGATE_HOST").ok())
        .unwrap_or_else(|| "127.0.0.1".to_string())
}

fn resolve_port(flag: Option<u16>) -> u16 {
    flag.or_else(|| {
        std::env::var("TEXTGATE_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
    })
    .unwrap_or(7860)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port, config } => {
            let gateway_config = GatewayConfig::load(config.as_deref())?;
            let host = resolve_host(host);
            let port = resolve_port(port);
            tracing::info!("textgate {} starting", env!("CARGO_PKG_VERSION"));
            textgate::api::serve_with_config(&host, port, gateway_config).await?;
        }
    }

    Ok(())
}
