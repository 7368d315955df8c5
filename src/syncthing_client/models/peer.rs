use serde::{Deserialize, Serialize};

use crate::syncthing_client::api::{ConnectionState, DeviceConfig};

/// Remote device as seen by the reporting daemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    #[serde(rename = "deviceID")]
    pub device_id: String,
    pub name: String,
    pub connected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_bytes_total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_bytes_total: Option<u64>,
}

impl DeviceInfo {
    pub fn from_parts(device: &DeviceConfig, connection: Option<&ConnectionState>) -> Self {
        Self {
            device_id: device.device_id.clone(),
            name: device
                .name
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| device.device_id.clone()),
            connected: connection.map(|c| c.connected).unwrap_or(false),
            address: connection.and_then(|c| c.address.clone()),
            client_version: connection.and_then(|c| c.client_version.clone()),
            in_bytes_total: connection.and_then(|c| c.in_bytes_total),
            out_bytes_total: connection.and_then(|c| c.out_bytes_total),
        }
    }
}
