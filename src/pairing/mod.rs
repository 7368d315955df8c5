//! Pairing a local folder with a registered server.

pub mod ignores;
pub mod merge;
mod orchestrator;
pub mod remote;
pub mod slug;

pub use ignores::{default_ignore, IgnoreTemplate};
pub use orchestrator::{
    ConfigXmlKey, LocalApiKeySource, PairOutcome, PairRequest, PairRole, PairingOrchestrator,
    StaticApiKey, StepReport, DEFAULT_LOCAL_DEVICE_NAME, DEFAULT_RESCAN_INTERVAL_S,
};
pub use slug::generate_folder_id;
