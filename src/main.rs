mod config;
mod core;
mod demos;
mod domain;
mod errors;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use crate::config::{home_dir, load_dotenv, Cli, Command};
use crate::core::client::kube_client::build_kube_client;

#[tokio::main]
async fn main() {
    load_dotenv();
    let cli = Cli::parse();
    let _guard = match logging::init_tracing(cli.verbose, cli.log_dir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            error!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli).await {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = cli.client_settings(home_dir());
    let client = build_kube_client(&settings)
        .await
        .context("Failed to build Kubernetes client")?;

    let mut stdout = std::io::stdout();
    match &cli.command {
        Command::Clientset(args) => demos::clientset::run(&client, args, &mut stdout).await?,
        Command::Discovery(args) => demos::discovery::run(&client, args, &mut stdout).await?,
        Command::Dynamic(args) => demos::dynamic::run(&client, args, &mut stdout).await?,
        Command::Rest(args) => demos::rest::run(&client, args, &mut stdout).await?,
    }

    info!("Done.");
    Ok(())
}
