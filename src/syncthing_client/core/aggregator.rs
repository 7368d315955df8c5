use futures::future::join_all;
use tracing::warn;

use crate::types::StxError;

use super::super::api::{ConnectionsResponse, DaemonConfig, FolderConfig, SystemStatus};
use super::super::client::SyncthingClient;
use super::super::models::{DeviceInfo, FolderInfo, ServerStatus, SystemSummary};

/// Composes a status report for one daemon from several control-API reads.
pub struct DataAggregator<'a> {
    client: &'a SyncthingClient,
}

impl<'a> DataAggregator<'a> {
    pub fn new(client: &'a SyncthingClient) -> Self {
        Self { client }
    }

    /// System status, connections and config are read concurrently; folder
    /// statuses follow once the config names the folders. Any failure of the
    /// first three fails the whole report.
    pub async fn compose_status(&self) -> Result<ServerStatus, StxError> {
        let (status, connections, config) = tokio::try_join!(
            self.client.system_status(),
            self.client.connections(),
            self.client.config(),
        )?;

        let folders = self.collect_folders(&config.folders).await;
        let devices = compose_devices(&config, &status, &connections);

        Ok(ServerStatus {
            system: SystemSummary::from(&status),
            folders,
            devices,
        })
    }

    /// Folders whose status lookup fails are logged and left out of the report.
    async fn collect_folders(&self, folders: &[FolderConfig]) -> Vec<FolderInfo> {
        let lookups = folders.iter().map(|folder| async move {
            match self.client.folder_status(&folder.id).await {
                Ok(status) => Some(FolderInfo::from_parts(folder, &status)),
                Err(err) => {
                    warn!(
                        url = %self.client.base_url(),
                        folder = %folder.id,
                        error = %err,
                        "Dropping folder from status report"
                    );
                    None
                }
            }
        });

        join_all(lookups).await.into_iter().flatten().collect()
    }
}

/// Configured devices minus the daemon itself.
fn compose_devices(
    config: &DaemonConfig,
    status: &SystemStatus,
    connections: &ConnectionsResponse,
) -> Vec<DeviceInfo> {
    config
        .devices
        .iter()
        .filter(|device| !device.device_id.is_empty() && device.device_id != status.my_id)
        .map(|device| {
            DeviceInfo::from_parts(device, connections.connections.get(&device.device_id))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MY_ID: &str = "ABCDEFG-1234567-ABCDEFG-1234567-ABCDEFG-1234567-ABCDEFG-1234567";

    async fn mount_basics(server: &MockServer, folders: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/rest/system/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "myID": MY_ID,
                "uptime": 3600,
                "startTime": "2024-01-01T00:00:00Z",
                "alloc": 1000000,
                "goroutines": 50
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/system/connections"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "connections": {
                    "DEVICEID-1234567": {
                        "address": "192.168.1.1:22000",
                        "clientVersion": "v1.27.0",
                        "connected": true,
                        "inBytesTotal": 1000,
                        "outBytesTotal": 2000,
                        "paused": false
                    }
                },
                "total": {"inBytesTotal": 1000, "outBytesTotal": 2000}
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/system/config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "folders": folders,
                "devices": [
                    {"deviceID": MY_ID, "name": "local"},
                    {"deviceID": "DEVICEID-1234567", "name": "remote"}
                ]
            })))
            .mount(server)
            .await;
    }

    fn folder_status(state: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "globalBytes": 1024000,
            "localBytes": 1024000,
            "needBytes": 0,
            "inSyncBytes": 1024000,
            "pullErrors": 0,
            "state": state
        }))
    }

    #[tokio::test]
    async fn composes_system_folders_and_peers() {
        let server = MockServer::start().await;
        mount_basics(&server, json!([{"id": "folder-1", "label": "Test Folder"}])).await;
        Mock::given(method("GET"))
            .and(path("/rest/db/status"))
            .and(query_param("folder", "folder-1"))
            .respond_with(folder_status("idle"))
            .mount(&server)
            .await;

        let client = SyncthingClient::new(&server.uri(), Some("k".into())).unwrap();
        let status = DataAggregator::new(&client).compose_status().await.unwrap();

        assert_eq!(status.system.device_id, MY_ID);
        assert_eq!(status.system.uptime, 3600);
        assert_eq!(status.folders.len(), 1);
        assert_eq!(status.folders[0].id, "folder-1");
        assert_eq!(status.folders[0].state, "idle");
        assert_eq!(status.devices.len(), 1);
        assert_eq!(status.devices[0].name, "remote");
        assert!(status.devices[0].connected);
        assert_eq!(status.devices[0].client_version.as_deref(), Some("v1.27.0"));
    }

    #[tokio::test]
    async fn failing_folder_lookup_is_dropped() {
        let server = MockServer::start().await;
        mount_basics(
            &server,
            json!([{"id": "good", "label": "Good"}, {"id": "bad", "label": "Bad"}]),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/rest/db/status"))
            .and(query_param("folder", "good"))
            .respond_with(folder_status("syncing"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/db/status"))
            .and(query_param("folder", "bad"))
            .respond_with(ResponseTemplate::new(500).set_body_string("no such folder"))
            .mount(&server)
            .await;

        let client = SyncthingClient::new(&server.uri(), Some("k".into())).unwrap();
        let status = DataAggregator::new(&client).compose_status().await.unwrap();

        assert_eq!(status.folders.len(), 1);
        assert_eq!(status.folders[0].id, "good");
    }

    #[tokio::test]
    async fn system_status_failure_fails_the_report() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/system/status"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Server Error"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/system/connections"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"connections": {}})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/system/config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"folders": [], "devices": []})))
            .mount(&server)
            .await;

        let client = SyncthingClient::new(&server.uri(), Some("k".into())).unwrap();
        let err = DataAggregator::new(&client).compose_status().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }
}
