//! `stx pair`.

use anyhow::{Context, Result};
use tracing::info;

use stx::config::Target;
use stx::pairing::{generate_folder_id, ConfigXmlKey, PairRequest, PairingOrchestrator};
use stx::report::format_pair_text;

use super::load_registry;
use crate::cli::PairArgs;

pub async fn run(args: PairArgs) -> Result<()> {
    let (registry, _) = load_registry().await?;
    let registered = registry.resolve(&args.server)?;
    let server = match args.server_key {
        Some(key) => Target::new(registered.name, registered.base_url, key),
        None => registered,
    };

    let folder_id = args
        .folder_id
        .unwrap_or_else(|| generate_folder_id(&args.label));
    info!(folder = %folder_id, server = %server.name, "Pairing folder");

    let request = PairRequest {
        server,
        local_url: args.local_url,
        local_name: args.local_name,
        folder_id,
        label: args.label,
        local_path: args.local_path,
        server_path: args.server_path,
        ignore_git: args.ignore_git,
        ignore_template: args.ignore_template,
        ssh_host: args.ssh,
    };

    let credentials = ConfigXmlKey {
        path: args.local_config,
    };
    let outcome = PairingOrchestrator::new(&credentials)
        .pair_folder(&request)
        .await
        .context("Pairing failed")?;

    println!("{}", format_pair_text(&outcome));
    Ok(())
}
