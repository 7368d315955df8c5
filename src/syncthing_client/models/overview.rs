use serde::{Deserialize, Serialize};

use crate::syncthing_client::api::SystemStatus;

use super::{DeviceInfo, FolderInfo};

/// Identity and uptime of one daemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSummary {
    #[serde(rename = "deviceID")]
    pub device_id: String,
    pub uptime: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
}

impl From<&SystemStatus> for SystemSummary {
    fn from(status: &SystemStatus) -> Self {
        Self {
            device_id: status.my_id.clone(),
            uptime: status.uptime,
            start_time: status.start_time.clone(),
        }
    }
}

/// Status payload for one server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub system: SystemSummary,
    pub folders: Vec<FolderInfo>,
    pub devices: Vec<DeviceInfo>,
}
