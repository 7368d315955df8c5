use std::env;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tokio::fs;
use tracing::debug;

use crate::types::StxError;

pub const DEFAULT_LOCAL_URL: &str = "http://127.0.0.1:8384";
pub const API_KEY_ENV: &str = "SYNCTHING_API_KEY";

/// Where a locally installed daemon keeps its `config.xml`, most specific first.
pub fn local_config_xml_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(state_home) = env::var("XDG_STATE_HOME") {
        if !state_home.trim().is_empty() {
            candidates.push(Path::new(&state_home).join("syncthing").join("config.xml"));
        }
    }
    if let Some(base) = BaseDirs::new() {
        let home = base.home_dir();
        candidates.push(
            home.join("Library")
                .join("Application Support")
                .join("Syncthing")
                .join("config.xml"),
        );
        candidates.push(home.join(".local/state/syncthing/config.xml"));
        candidates.push(home.join(".config/syncthing/config.xml"));
    }
    candidates
}

/// Resolve the local daemon's API key.
///
/// `SYNCTHING_API_KEY` wins when set. Otherwise the key is read from
/// `explicit` or the first existing default `config.xml`.
pub async fn load_local_api_key(explicit: Option<&Path>) -> Result<String, StxError> {
    if let Ok(value) = env::var(API_KEY_ENV) {
        if !value.trim().is_empty() {
            return Ok(value.trim().to_string());
        }
    }

    let candidates = match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => local_config_xml_candidates(),
    };
    for path in &candidates {
        if !fs::try_exists(path).await.unwrap_or(false) {
            continue;
        }
        debug!(path = %path.display(), "Reading local Syncthing config");
        let contents = fs::read_to_string(path).await?;
        return extract_api_key(&contents).ok_or_else(|| StxError::MissingApiKey {
            path: path.display().to_string(),
        });
    }

    Err(StxError::MissingApiKey {
        path: candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

pub fn extract_api_key(contents: &str) -> Option<String> {
    let start_tag = "<apikey>";
    let end_tag = "</apikey>";
    let start = contents.find(start_tag)? + start_tag.len();
    let rest = &contents[start..];
    let end = rest.find(end_tag)?;
    let key = rest[..end].trim();
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}
