//! Registry of named servers and their API keys.

mod loader;
mod paths;
mod types;

pub use paths::{config_dir, registry_path, CONFIG_DIR_ENV};
pub use types::{Registry, ServerEntry, Target, REGISTRY_VERSION};
