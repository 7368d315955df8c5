mod folder;
mod overview;
mod peer;

pub use folder::FolderInfo;
pub use overview::{ServerStatus, SystemSummary};
pub use peer::DeviceInfo;
