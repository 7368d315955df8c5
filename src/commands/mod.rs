//! One module per group of subcommands.

pub mod pair;
pub mod query;
pub mod servers;

use std::path::PathBuf;

use anyhow::{Context, Result};
use stx::config::{registry_path, Registry};

pub(crate) async fn load_registry() -> Result<(Registry, PathBuf)> {
    let path = registry_path()?;
    let registry = Registry::load(&path)
        .await
        .with_context(|| format!("Failed to load {}", path.display()))?;
    Ok((registry, path))
}
