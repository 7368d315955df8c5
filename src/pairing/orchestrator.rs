use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Map;
use tokio::fs;
use tracing::{info, warn};

use crate::config::Target;
use crate::syncthing_client::api::{FolderConfig, FolderDevice, FolderType};
use crate::syncthing_client::{load_local_api_key, SyncthingClient};
use crate::types::StxError;

use super::ignores::{default_ignore, IgnoreTemplate};
use super::merge::{upsert_device, upsert_folder};
use super::remote::{ensure_remote_dir, validate_server_path};

pub const DEFAULT_RESCAN_INTERVAL_S: u32 = 3600;
pub const DEFAULT_LOCAL_DEVICE_NAME: &str = "local";

/// Side of a pairing. The topology is fixed: the server is a receive-only
/// mirror and the local node is where edits originate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairRole {
    Server,
    Local,
}

impl PairRole {
    pub fn folder_type(self) -> FolderType {
        match self {
            PairRole::Server => FolderType::ReceiveOnly,
            PairRole::Local => FolderType::SendReceive,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            PairRole::Server => "ReceiveOnly",
            PairRole::Local => "Send&Receive",
        }
    }
}

/// Source of the local daemon's API key.
#[async_trait]
pub trait LocalApiKeySource: Send + Sync {
    async fn api_key(&self) -> Result<String, StxError>;
}

/// Reads the key from the environment or the local daemon's `config.xml`.
#[derive(Debug, Clone, Default)]
pub struct ConfigXmlKey {
    pub path: Option<PathBuf>,
}

#[async_trait]
impl LocalApiKeySource for ConfigXmlKey {
    async fn api_key(&self) -> Result<String, StxError> {
        load_local_api_key(self.path.as_deref()).await
    }
}

/// A key supplied up front.
#[derive(Clone)]
pub struct StaticApiKey(pub String);

#[async_trait]
impl LocalApiKeySource for StaticApiKey {
    async fn api_key(&self) -> Result<String, StxError> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Clone)]
pub struct PairRequest {
    pub server: Target,
    pub local_url: String,
    pub local_name: String,
    pub folder_id: String,
    pub label: String,
    pub local_path: PathBuf,
    pub server_path: String,
    pub ignore_git: bool,
    pub ignore_template: IgnoreTemplate,
    /// Create `server_path` on this host over ssh before configuring.
    pub ssh_host: Option<String>,
}

impl PairRequest {
    fn folder_for(&self, role: PairRole, peer_device_id: &str) -> FolderConfig {
        let path = match role {
            PairRole::Server => self.server_path.clone(),
            PairRole::Local => self.local_path.display().to_string(),
        };
        FolderConfig {
            id: self.folder_id.clone(),
            label: Some(self.label.clone()),
            path: Some(path),
            folder_type: Some(role.folder_type()),
            devices: vec![FolderDevice::new(peer_device_id)],
            rescan_interval_s: Some(DEFAULT_RESCAN_INTERVAL_S),
            fs_watcher_enabled: Some(true),
            extra: Map::new(),
        }
    }
}

/// Result of one best-effort step on one daemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    pub target: String,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepReport {
    fn from_result(target: &str, step: &str, result: Result<(), StxError>) -> Self {
        match result {
            Ok(()) => Self {
                target: target.to_string(),
                ok: true,
                error: None,
            },
            Err(err) => {
                warn!(target = %target, step = %step, error = %err, "Best-effort step failed");
                Self {
                    target: target.to_string(),
                    ok: false,
                    error: Some(err.to_string()),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairOutcome {
    pub folder_id: String,
    pub server: String,
    pub local_path: String,
    pub server_path: String,
    pub ignores: Vec<StepReport>,
    pub restarts: Vec<StepReport>,
}

impl PairOutcome {
    pub fn fully_applied(&self) -> bool {
        self.ignores.iter().chain(&self.restarts).all(|step| step.ok)
    }
}

/// Drives a pairing between the local daemon and one server.
///
/// Device-id lookup and both config writes abort the run on failure, leaving
/// whatever was already written in place. Ignore patterns and restarts are
/// best effort and only reported.
pub struct PairingOrchestrator<'a> {
    credentials: &'a dyn LocalApiKeySource,
}

impl<'a> PairingOrchestrator<'a> {
    pub fn new(credentials: &'a dyn LocalApiKeySource) -> Self {
        Self { credentials }
    }

    pub async fn pair_folder(&self, request: &PairRequest) -> Result<PairOutcome, StxError> {
        validate_server_path(&request.server_path)?;
        if request.folder_id.trim().is_empty() {
            return Err(StxError::Validation("folder id is empty".to_string()));
        }

        let local_key = self.credentials.api_key().await?;
        let local = SyncthingClient::new(&request.local_url, Some(local_key))?;
        let server = request.server.client()?;

        let (local_id, server_id) = tokio::try_join!(local.device_id(), server.device_id())?;
        info!(local = %local_id, server = %server_id, "Resolved device ids");

        ensure_local_dir(&request.local_path).await?;
        if let Some(host) = &request.ssh_host {
            ensure_remote_dir(host, &request.server_path).await?;
        }

        // Server first: it only ever receives, so a later local failure
        // leaves it waiting rather than inconsistent.
        self.configure(
            &server,
            &request.server.name,
            PairRole::Server,
            request,
            &local_id,
            &request.local_name,
        )
        .await?;
        self.configure(
            &local,
            "local",
            PairRole::Local,
            request,
            &server_id,
            &request.server.name,
        )
        .await?;

        let lines = default_ignore(request.ignore_template, request.ignore_git);
        let (server_ignores, local_ignores) = tokio::join!(
            server.set_ignores(&request.folder_id, &lines),
            local.set_ignores(&request.folder_id, &lines),
        );
        let ignores = vec![
            StepReport::from_result(&request.server.name, "ignores", server_ignores),
            StepReport::from_result("local", "ignores", local_ignores),
        ];

        let (server_restart, local_restart) = tokio::join!(server.restart(), local.restart());
        let restarts = vec![
            StepReport::from_result(&request.server.name, "restart", server_restart),
            StepReport::from_result("local", "restart", local_restart),
        ];

        Ok(PairOutcome {
            folder_id: request.folder_id.clone(),
            server: request.server.name.clone(),
            local_path: request.local_path.display().to_string(),
            server_path: request.server_path.clone(),
            ignores,
            restarts,
        })
    }

    /// Read-modify-write of one daemon's config: add the peer device and the
    /// folder in the role's shape. The document is re-read right before the
    /// write; concurrent edits by others between the two calls are lost.
    async fn configure(
        &self,
        client: &SyncthingClient,
        side: &str,
        role: PairRole,
        request: &PairRequest,
        peer_id: &str,
        peer_name: &str,
    ) -> Result<(), StxError> {
        let mut config = client.config().await?;
        upsert_device(&mut config, peer_id, peer_name);
        upsert_folder(&mut config, request.folder_for(role, peer_id));
        client.put_config(&config).await?;
        info!(
            side = %side,
            folder = %request.folder_id,
            folder_type = %role.folder_type(),
            "Folder configured"
        );
        Ok(())
    }
}

async fn ensure_local_dir(path: &Path) -> Result<(), StxError> {
    fs::create_dir_all(path).await.map_err(|err| {
        StxError::Config(format!("Failed to create {}: {err}", path.display()))
    })
}
