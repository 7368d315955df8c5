use serde::{Deserialize, Serialize};

use crate::syncthing_client::api::{FolderConfig, FolderStatus};

/// Folder line of a status report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderInfo {
    pub id: String,
    pub label: String,
    pub state: String,
    pub global_bytes: u64,
    pub local_bytes: u64,
    pub need_bytes: u64,
    pub pull_errors: u64,
    pub completion: f64,
}

impl FolderInfo {
    pub fn from_parts(folder: &FolderConfig, status: &FolderStatus) -> Self {
        Self {
            id: folder.id.clone(),
            label: folder
                .label
                .clone()
                .filter(|label| !label.is_empty())
                .unwrap_or_else(|| folder.id.clone()),
            state: status.state.clone(),
            global_bytes: status.global_bytes,
            local_bytes: status.local_bytes,
            need_bytes: status.need_bytes,
            pull_errors: status.pull_errors,
            completion: compute_completion(status.global_bytes, status.need_bytes),
        }
    }
}

/// Percentage of the global folder size already present locally.
fn compute_completion(global_bytes: u64, need_bytes: u64) -> f64 {
    if global_bytes == 0 {
        return 100.0;
    }
    let complete = global_bytes.saturating_sub(need_bytes);
    ((complete as f64 / global_bytes as f64) * 100.0).clamp(0.0, 100.0)
}
