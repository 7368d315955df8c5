pub mod api;
mod client;
mod core;
mod helpers;
pub mod models;

pub use client::{SyncthingClient, REQUEST_TIMEOUT};
pub use self::core::DataAggregator;
pub use helpers::{
    extract_api_key, load_local_api_key, local_config_xml_candidates, API_KEY_ENV,
    DEFAULT_LOCAL_URL,
};
