//! Manage the server registry.

use anyhow::{bail, Context, Result};
use reqwest::Url;

use stx::config::ServerEntry;

use super::load_registry;

pub async fn add(name: &str, url: &str, api_key: Option<String>) -> Result<()> {
    let parsed = Url::parse(url).with_context(|| format!("Invalid server URL: {url}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("Server URL must be http or https: {url}");
    }

    let api_key = match api_key {
        Some(key) => key,
        None => rpassword::prompt_password("Server API key: ")
            .context("Failed to read API key")?,
    };
    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    let (mut registry, path) = load_registry().await?;
    registry.upsert(
        name,
        ServerEntry {
            url: url.trim_end_matches('/').to_string(),
            api_key,
        },
    );
    registry.save(&path).await?;
    println!("Saved server: {name}");
    Ok(())
}

pub async fn list() -> Result<()> {
    let (registry, _) = load_registry().await?;
    if registry.servers.is_empty() {
        println!("No servers registered.");
        return Ok(());
    }
    for (name, entry) in &registry.servers {
        println!("{name}\t{}", entry.url);
    }
    Ok(())
}

pub async fn remove(name: &str) -> Result<()> {
    let (mut registry, path) = load_registry().await?;
    if !registry.remove(name) {
        bail!("No such server: {name}");
    }
    registry.save(&path).await?;
    println!("Removed server: {name}");
    Ok(())
}
