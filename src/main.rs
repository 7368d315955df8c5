//! # stx
//!
//! Pair folders between the local Syncthing daemon and registered servers,
//! and look at many servers at once.
//!
//! ```bash
//! stx add-server safe-101 http://100.64.0.1:8384
//! stx pair --server safe-101 --label "My Project" \
//!     --local-path ~/code/my-project --server-path /data/my-project --ignore-git
//! stx status --all
//! stx errors --server safe-101 --clear
//! stx events --server safe-101 --types StateChanged --limit 20
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{pair, query, servers};
use stx::queries::EventsOptions;

const LOG_ENV: &str = "STX_LOG";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries reports, so logs go to stderr
    let env_filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::AddServer { name, url, api_key } => servers::add(&name, &url, api_key).await,
        Commands::ListServers => servers::list().await,
        Commands::RemoveServer { name } => servers::remove(&name).await,
        Commands::Pair(args) => pair::run(args).await,
        Commands::Status { targets, json } => query::status(targets, json).await,
        Commands::Errors {
            targets,
            json,
            clear,
        } => query::errors(targets, json, clear).await,
        Commands::Events {
            server,
            types,
            since,
            limit,
            json,
        } => {
            let options = EventsOptions {
                since,
                limit,
                types,
            };
            query::events(&server, options, json).await
        }
        Commands::Completion { shell } => {
            print!("{}", stx::completion::generate(shell));
            Ok(())
        }
    }
}
