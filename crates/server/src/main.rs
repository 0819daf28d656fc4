//! Madrasa HTTP backend.
//!
//! Reads settings from flags/environment, wires the agents to the external
//! collaborators, and serves until Ctrl-C or SIGTERM.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use server::{AppContext, Settings};

#[derive(Parser)]
#[command(name = "madrasa-server")]
#[command(about = "Madrasa learning-path backend", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,
}

#[tokio::main]
async fn main() -> Result<()> {
    server::init_tracing("info,server=debug,agents=debug,clients=debug");

    let cli = Cli::parse();
    info!("Starting Madrasa backend with {:?}", cli.settings);

    let context = AppContext::from_settings(&cli.settings)?;
    server::serve(&cli.settings, context).await
}
