//! In-memory upserts over a daemon configuration document.

use serde_json::Map;

use crate::syncthing_client::api::{DaemonConfig, DeviceConfig, FolderConfig, FolderDevice};

/// Add `device_id` unless a device with that id is already configured.
/// An existing entry is left exactly as it is.
pub fn upsert_device(config: &mut DaemonConfig, device_id: &str, name: &str) {
    if config.device(device_id).is_some() {
        return;
    }
    config.devices.push(DeviceConfig {
        device_id: device_id.to_string(),
        name: Some(name.to_string()),
        addresses: Some(vec!["dynamic".to_string()]),
        compression: Some("metadata".to_string()),
        introduced_by: Some(String::new()),
        extra: Map::new(),
    });
}

/// Insert `folder`, or update the folder with the same id.
///
/// On update the scalar settings carried by `folder` replace the existing
/// ones, extra keys are layered on top, and the device lists are unioned by
/// device id with existing entries winning.
pub fn upsert_folder(config: &mut DaemonConfig, folder: FolderConfig) {
    let Some(existing) = config.folders.iter_mut().find(|f| f.id == folder.id) else {
        config.folders.push(folder);
        return;
    };

    let FolderConfig {
        id: _,
        label,
        path,
        folder_type,
        devices,
        rescan_interval_s,
        fs_watcher_enabled,
        extra,
    } = folder;

    if label.is_some() {
        existing.label = label;
    }
    if path.is_some() {
        existing.path = path;
    }
    if folder_type.is_some() {
        existing.folder_type = folder_type;
    }
    if rescan_interval_s.is_some() {
        existing.rescan_interval_s = rescan_interval_s;
    }
    if fs_watcher_enabled.is_some() {
        existing.fs_watcher_enabled = fs_watcher_enabled;
    }
    existing.extra.extend(extra);
    merge_devices(&mut existing.devices, devices);
}

fn merge_devices(existing: &mut Vec<FolderDevice>, incoming: Vec<FolderDevice>) {
    for device in incoming {
        if !existing.iter().any(|d| d.device_id == device.device_id) {
            existing.push(device);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syncthing_client::api::FolderType;
    use serde_json::json;

    fn base_config() -> DaemonConfig {
        serde_json::from_value(json!({
            "version": 37,
            "options": {"listenAddresses": ["default"]},
            "gui": {"apiKey": "k"},
            "devices": [{"deviceID": "SELF", "name": "me", "addresses": ["dynamic"]}],
            "folders": [{
                "id": "f1",
                "label": "Old",
                "path": "/data/old",
                "type": "receiveonly",
                "devices": [{"deviceID": "SELF", "introducedBy": ""}, {"deviceID": "PEER1"}],
                "rescanIntervalS": 60,
                "versioning": {"type": "trashcan"}
            }]
        }))
        .unwrap()
    }

    fn folder(label: &str, devices: &[&str]) -> FolderConfig {
        FolderConfig {
            id: "f1".to_string(),
            label: Some(label.to_string()),
            path: Some("/data/new".to_string()),
            folder_type: Some(FolderType::ReceiveOnly),
            devices: devices.iter().map(|d| FolderDevice::new(*d)).collect(),
            rescan_interval_s: Some(3600),
            fs_watcher_enabled: Some(true),
            extra: Map::new(),
        }
    }

    #[test]
    fn device_upsert_is_idempotent() {
        let mut once = base_config();
        upsert_device(&mut once, "NEW", "laptop");
        let mut twice = once.clone();
        upsert_device(&mut twice, "NEW", "laptop");

        assert_eq!(once.devices.len(), 2);
        assert_eq!(once, twice);
        let added = once.device("NEW").unwrap();
        assert_eq!(added.addresses.as_deref(), Some(&["dynamic".to_string()][..]));
        assert_eq!(added.compression.as_deref(), Some("metadata"));
        assert_eq!(added.introduced_by.as_deref(), Some(""));
    }

    #[test]
    fn existing_device_is_never_overwritten() {
        let mut config = base_config();
        upsert_device(&mut config, "SELF", "renamed");
        assert_eq!(config.devices.len(), 1);
        assert_eq!(config.devices[0].name.as_deref(), Some("me"));
    }

    #[test]
    fn empty_collections_are_created() {
        let mut config = DaemonConfig::default();
        upsert_device(&mut config, "A", "a");
        upsert_folder(&mut config, folder("Docs", &["A"]));
        assert_eq!(config.devices.len(), 1);
        assert_eq!(config.folders.len(), 1);
    }

    #[test]
    fn new_folder_is_appended_verbatim() {
        let mut config = base_config();
        let mut incoming = folder("Other", &["X"]);
        incoming.id = "f2".to_string();
        upsert_folder(&mut config, incoming.clone());
        assert_eq!(config.folders.len(), 2);
        assert_eq!(config.folders[1], incoming);
    }

    #[test]
    fn folder_upsert_is_idempotent() {
        let mut once = base_config();
        upsert_folder(&mut once, folder("Docs", &["PEER2"]));
        let mut twice = once.clone();
        upsert_folder(&mut twice, folder("Docs", &["PEER2"]));
        assert_eq!(once.folders, twice.folders);
    }

    #[test]
    fn relabel_keeps_unrelated_fields() {
        let mut config = base_config();
        upsert_folder(&mut config, folder("Docs", &["PEER2"]));
        upsert_folder(&mut config, folder("Renamed", &["PEER2"]));

        let f1 = config.folder("f1").unwrap();
        assert_eq!(f1.label.as_deref(), Some("Renamed"));
        assert_eq!(f1.path.as_deref(), Some("/data/new"));
        assert_eq!(f1.rescan_interval_s, Some(3600));
        assert_eq!(f1.extra.get("versioning"), Some(&json!({"type": "trashcan"})));
        assert_eq!(config.extra.get("version"), Some(&json!(37)));
        assert_eq!(config.extra.get("gui"), Some(&json!({"apiKey": "k"})));
        assert_eq!(
            config.extra.get("options"),
            Some(&json!({"listenAddresses": ["default"]}))
        );
    }

    #[test]
    fn disjoint_device_sets_are_unioned() {
        let mut config = base_config();
        upsert_folder(&mut config, folder("Docs", &["PEER2", "PEER3"]));

        let ids: Vec<_> = config.folder("f1").unwrap().devices.iter().map(|d| d.device_id.as_str()).collect();
        assert_eq!(ids, vec!["SELF", "PEER1", "PEER2", "PEER3"]);
    }

    #[test]
    fn existing_device_entry_wins_in_union() {
        let mut config = base_config();
        let mut incoming = folder("Docs", &[]);
        let mut dup = FolderDevice::new("SELF");
        dup.extra.insert("introducedBy".into(), json!("SOMEONE"));
        incoming.devices.push(dup);
        upsert_folder(&mut config, incoming);

        let devices = &config.folder("f1").unwrap().devices;
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].extra.get("introducedBy"), Some(&json!("")));
    }

    #[test]
    fn invalid_folder_type_is_not_validated() {
        let mut config = base_config();
        let mut incoming = folder("Docs", &[]);
        incoming.folder_type = Some(FolderType::Other("bogus".into()));
        upsert_folder(&mut config, incoming);
        assert_eq!(
            config.folder("f1").unwrap().folder_type,
            Some(FolderType::Other("bogus".into()))
        );
    }
}
