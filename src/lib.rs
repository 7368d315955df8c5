//! Pair Syncthing folders between the local daemon and registered servers,
//! and query status, errors and events across those servers.

pub mod completion;
pub mod config;
pub mod fanout;
pub mod pairing;
pub mod queries;
pub mod redact;
pub mod report;
pub mod syncthing_client;
pub mod types;

pub use types::StxError;
