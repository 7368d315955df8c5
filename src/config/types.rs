use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::redact::REDACTED;
use crate::syncthing_client::SyncthingClient;
use crate::types::StxError;

pub const REGISTRY_VERSION: u32 = 1;

/// Stored connection details for one registered server.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerEntry {
    pub url: String,
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

impl fmt::Debug for ServerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerEntry")
            .field("url", &self.url)
            .field("api_key", &REDACTED)
            .finish()
    }
}

/// A named daemon resolved for one operation.
#[derive(Clone, PartialEq)]
pub struct Target {
    pub name: String,
    pub base_url: String,
    pub api_key: String,
}

impl Target {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn client(&self) -> Result<SyncthingClient, StxError> {
        SyncthingClient::new(&self.base_url, Some(self.api_key.clone()))
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("api_key", &REDACTED)
            .finish()
    }
}

/// Versioned registry document (`servers.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub servers: BTreeMap<String, ServerEntry>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            version: REGISTRY_VERSION,
            servers: BTreeMap::new(),
        }
    }
}

impl Registry {
    pub fn resolve(&self, name: &str) -> Result<Target, StxError> {
        self.servers
            .get(name)
            .map(|entry| Target::new(name, entry.url.clone(), entry.api_key.clone()))
            .ok_or_else(|| StxError::UnknownTarget(name.to_string()))
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.servers.keys().map(String::as_str).collect()
    }

    pub fn upsert(&mut self, name: impl Into<String>, entry: ServerEntry) {
        self.servers.insert(name.into(), entry);
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.servers.remove(name).is_some()
    }

    pub fn targets(&self) -> Vec<Target> {
        self.servers
            .iter()
            .map(|(name, entry)| Target::new(name, entry.url.clone(), entry.api_key.clone()))
            .collect()
    }

    /// One named target, or every registered target when `all` is set.
    pub fn select(&self, server: Option<&str>, all: bool) -> Result<Vec<Target>, StxError> {
        if all {
            if self.servers.is_empty() {
                return Err(StxError::Config("No servers registered.".to_string()));
            }
            return Ok(self.targets());
        }
        match server {
            Some(name) => Ok(vec![self.resolve(name)?]),
            None => Err(StxError::Config(
                "Specify --server <name> or --all".to_string(),
            )),
        }
    }
}
