mod cli;
mod client;
mod commands;
mod config;
mod error;
mod fetcher;
mod logging;
mod output;
mod render;
mod responses;
mod server;
mod tracker;
mod types;

use std::io;
use std::sync::Arc;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::{Cli, Commands};
use config::Config;
use fetcher::IssueFetcher;
use tracker::LinearConnector;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        for cause in e.chain().skip(1) {
            eprintln!("Caused by: {cause}");
        }
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging();

    match cli.command {
        // Commands that don't require config
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "linear-tasks", &mut io::stdout());
        }
        Some(Commands::Init) => {
            commands::init::run().await?;
        }
        command => {
            let config = Config::load().context("loading configuration")?;
            let connector = LinearConnector::new(config.endpoint()?, config.request_timeout()?);
            let fetcher =
                IssueFetcher::new(config.api_key(), Arc::new(connector), config.fetch_timeout()?);

            match command {
                Some(Commands::Issues { json }) => {
                    commands::issues::list(&fetcher, json).await?;
                }
                Some(Commands::Serve { bind }) => {
                    commands::serve::run(&config, fetcher, bind.as_deref()).await?;
                }
                None => {
                    commands::serve::run(&config, fetcher, None).await?;
                }
                Some(Commands::Completions { .. } | Commands::Init) => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
