use std::path::Path;

use tokio::fs;
use tracing::{debug, info};

use crate::types::StxError;

use super::types::{Registry, REGISTRY_VERSION};

impl Registry {
    /// Read the registry at `path`. A missing file is an empty registry; a
    /// document without `version` is migrated to the current version.
    pub async fn load(path: &Path) -> Result<Self, StxError> {
        if !fs::try_exists(path).await? {
            debug!(path = %path.display(), "Registry not found, starting empty");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).await.map_err(|err| {
            StxError::Config(format!("Failed to read {}: {err}", path.display()))
        })?;
        let mut registry: Registry = serde_json::from_str(&contents).map_err(|err| {
            StxError::Config(format!("Failed to parse {}: {err}", path.display()))
        })?;

        if registry.version == 0 {
            info!(path = %path.display(), "Migrating legacy registry format");
            registry.version = REGISTRY_VERSION;
        }

        Ok(registry)
    }

    /// Write the registry with owner-only permissions, creating the directory.
    pub async fn save(&self, path: &Path) -> Result<(), StxError> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).await?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents).await?;
        set_owner_only(path).await?;
        debug!(path = %path.display(), servers = self.servers.len(), "Registry saved");
        Ok(())
    }
}

async fn set_owner_only(path: &Path) -> Result<(), StxError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}
