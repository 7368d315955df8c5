use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Full daemon configuration as returned by `GET /rest/system/config`.
///
/// Only the device and folder collections are modelled; every other top-level
/// key lands in `extra` and is written back untouched on `PUT`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DaemonConfig {
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,
    #[serde(default)]
    pub folders: Vec<FolderConfig>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DaemonConfig {
    pub fn device(&self, device_id: &str) -> Option<&DeviceConfig> {
        self.devices.iter().find(|d| d.device_id == device_id)
    }

    pub fn folder(&self, folder_id: &str) -> Option<&FolderConfig> {
        self.folders.iter().find(|f| f.id == folder_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    #[serde(rename = "deviceID")]
    pub device_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,
    #[serde(
        default,
        rename = "introducedBy",
        skip_serializing_if = "Option::is_none"
    )]
    pub introduced_by: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderConfig {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub folder_type: Option<FolderType>,
    #[serde(default)]
    pub devices: Vec<FolderDevice>,
    #[serde(
        default,
        rename = "rescanIntervalS",
        skip_serializing_if = "Option::is_none"
    )]
    pub rescan_interval_s: Option<u32>,
    #[serde(
        default,
        rename = "fsWatcherEnabled",
        skip_serializing_if = "Option::is_none"
    )]
    pub fs_watcher_enabled: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A device participating in a folder. Extra keys (e.g. `introducedBy`,
/// `encryptionPassword`) are preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderDevice {
    #[serde(rename = "deviceID")]
    pub device_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FolderDevice {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            extra: Map::new(),
        }
    }
}

/// Folder role as spelled by the daemon. Unrecognised values are carried
/// through verbatim; the daemon rejects them on `PUT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FolderType {
    SendReceive,
    SendOnly,
    ReceiveOnly,
    ReceiveEncrypted,
    Other(String),
}

impl FolderType {
    pub fn as_str(&self) -> &str {
        match self {
            FolderType::SendReceive => "sendreceive",
            FolderType::SendOnly => "sendonly",
            FolderType::ReceiveOnly => "receiveonly",
            FolderType::ReceiveEncrypted => "receiveencrypted",
            FolderType::Other(raw) => raw,
        }
    }
}

impl From<String> for FolderType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "sendreceive" => FolderType::SendReceive,
            "sendonly" => FolderType::SendOnly,
            "receiveonly" => FolderType::ReceiveOnly,
            "receiveencrypted" => FolderType::ReceiveEncrypted,
            _ => FolderType::Other(value),
        }
    }
}

impl From<FolderType> for String {
    fn from(value: FolderType) -> Self {
        match value {
            FolderType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FolderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SystemStatus {
    #[serde(rename = "myID")]
    pub my_id: String,
    #[serde(default)]
    pub uptime: u64,
    #[serde(default, rename = "startTime")]
    pub start_time: Option<String>,
    #[serde(default)]
    pub alloc: Option<u64>,
    #[serde(default)]
    pub sys: Option<u64>,
    #[serde(default)]
    pub goroutines: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConnectionsResponse {
    #[serde(default)]
    pub connections: HashMap<String, ConnectionState>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConnectionState {
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub paused: bool,
    #[serde(default, rename = "clientVersion")]
    pub client_version: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, rename = "inBytesTotal")]
    pub in_bytes_total: Option<u64>,
    #[serde(default, rename = "outBytesTotal")]
    pub out_bytes_total: Option<u64>,
}

/// Snapshot from `GET /rest/db/status`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderStatus {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub global_bytes: u64,
    #[serde(default)]
    pub local_bytes: u64,
    #[serde(default)]
    pub need_bytes: u64,
    #[serde(default)]
    pub in_sync_bytes: u64,
    #[serde(default)]
    pub pull_errors: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemError {
    pub when: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct ErrorsResponse {
    #[serde(default)]
    pub errors: Option<Vec<SystemError>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncthingEvent {
    pub id: u64,
    #[serde(default, rename = "globalID", skip_serializing_if = "Option::is_none")]
    pub global_id: Option<u64>,
    pub time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: Value,
}

impl SyncthingEvent {
    pub fn folder_id(&self) -> Option<&str> {
        self.data.get("folder").and_then(|v| v.as_str())
    }
}

#[derive(Debug, Serialize)]
pub struct IgnoresBody<'a> {
    pub ignore: &'a [String],
}
