mod queries;
mod types;

pub use queries::{EventsQuery, FolderStatusQuery};
pub use types::{
    ConnectionState, ConnectionsResponse, DaemonConfig, DeviceConfig, ErrorsResponse,
    FolderConfig, FolderDevice, FolderStatus, FolderType, IgnoresBody, SyncthingEvent,
    SystemError, SystemStatus,
};
