use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use stx::completion::Shell;
use stx::pairing::IgnoreTemplate;

/// Pair Syncthing folders with registered servers and query their state.
#[derive(Parser, Debug)]
#[command(name = "stx")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Debug logging on stderr (overrides STX_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a Syncthing server (stores URL + API key locally)
    AddServer {
        /// Server name (e.g. safe-101)
        name: String,
        /// Server Syncthing base URL (e.g. http://100.64.0.1:8384)
        url: String,
        /// API key; prompted for when omitted
        #[arg(long)]
        api_key: Option<String>,
    },

    /// List registered servers
    ListServers,

    /// Remove a registered server
    RemoveServer { name: String },

    /// Pair a local folder with a registered server
    Pair(PairArgs),

    /// Query Syncthing status
    Status {
        #[command(flatten)]
        targets: TargetArgs,
        #[arg(long)]
        json: bool,
    },

    /// View or clear Syncthing errors
    Errors {
        #[command(flatten)]
        targets: TargetArgs,
        #[arg(long)]
        json: bool,
        /// Clear the error list instead of showing it
        #[arg(long)]
        clear: bool,
    },

    /// View Syncthing events of one server
    Events {
        #[arg(long)]
        server: String,
        /// Comma-separated event types
        #[arg(long, value_delimiter = ',')]
        types: Vec<String>,
        /// Only events after this id
        #[arg(long)]
        since: Option<u64>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion script
    Completion { shell: Shell },
}

#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Registered server name
    #[arg(long, conflicts_with = "all", required_unless_present = "all")]
    pub server: Option<String>,
    /// Every registered server
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct PairArgs {
    /// Registered server name
    #[arg(long)]
    pub server: String,
    /// Folder label
    #[arg(long)]
    pub label: String,
    /// Folder path on this machine
    #[arg(long)]
    pub local_path: PathBuf,
    /// Folder path on the server
    #[arg(long)]
    pub server_path: String,
    /// Folder ID; derived from the label when omitted
    #[arg(long)]
    pub folder_id: Option<String>,
    /// Local Syncthing URL
    #[arg(long, env = "SYNCTHING_API_URL", default_value = stx::syncthing_client::DEFAULT_LOCAL_URL)]
    pub local_url: String,
    /// Use this server API key instead of the registered one
    #[arg(long)]
    pub server_key: Option<String>,
    /// Name the server records for this machine
    #[arg(long, default_value = stx::pairing::DEFAULT_LOCAL_DEVICE_NAME)]
    pub local_name: String,
    /// Local Syncthing config.xml to read the API key from
    #[arg(long)]
    pub local_config: Option<PathBuf>,
    /// Create the server path on this ssh host first
    #[arg(long)]
    pub ssh: Option<String>,
    /// Also ignore .git
    #[arg(long)]
    pub ignore_git: bool,
    #[arg(long, default_value_t = IgnoreTemplate::NodePython)]
    pub ignore_template: IgnoreTemplate,
}
