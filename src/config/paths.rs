use std::env;
use std::path::PathBuf;

use directories::BaseDirs;

use crate::types::StxError;

pub const CONFIG_DIR_ENV: &str = "STX_CONFIG_DIR";
const REGISTRY_FILE: &str = "servers.json";

/// Directory holding `servers.json`.
///
/// `STX_CONFIG_DIR` wins, then `$XDG_CONFIG_HOME/stx`, then `~/.config/stx`.
pub fn config_dir() -> Result<PathBuf, StxError> {
    if let Some(dir) = non_empty_env(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty_env("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("stx"));
    }
    let base = BaseDirs::new()
        .ok_or_else(|| StxError::Config("Could not determine home directory".to_string()))?;
    Ok(base.home_dir().join(".config").join("stx"))
}

pub fn registry_path() -> Result<PathBuf, StxError> {
    Ok(config_dir()?.join(REGISTRY_FILE))
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
