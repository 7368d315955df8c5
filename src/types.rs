use thiserror::Error;

/// Errors raised by the Syncthing client, the pairing flow and the registry.
#[derive(Debug, Error)]
pub enum StxError {
    /// The request never produced a response (connection refused, DNS, timeout).
    #[error("{method} {path} failed: {source}")]
    Transport {
        method: String,
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The daemon answered with a non-2xx status.
    #[error("{method} {path} -> {}: {body}", status.map(|s| s.to_string()).unwrap_or_else(|| "?".to_string()))]
    Api {
        method: String,
        path: String,
        status: Option<u16>,
        body: String,
    },

    #[error("{method} {path} returned an unreadable body: {source}")]
    Decode {
        method: String,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Syncthing API key not found (looked in {path})")]
    MissingApiKey { path: String },

    #[error("Unknown server: {0}. Use: stx add-server <name> <url>")]
    UnknownTarget(String),

    #[error("Refusing to continue: {0}")]
    Validation(String),

    #[error("{0}")]
    Command(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StxError {
    /// True for missing credentials and unknown targets.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            StxError::Config(_) | StxError::MissingApiKey { .. } | StxError::UnknownTarget(_)
        )
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, StxError::Transport { .. })
    }

    /// HTTP status of an API error, if the daemon answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            StxError::Api { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_carries_method_path_and_status() {
        let err = StxError::Api {
            method: "GET".to_string(),
            path: "/rest/system/status".to_string(),
            status: Some(500),
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "GET /rest/system/status -> 500: boom");
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_configuration());
    }

    #[test]
    fn configuration_family() {
        assert!(StxError::UnknownTarget("x".into()).is_configuration());
        assert!(StxError::MissingApiKey { path: "p".into() }.is_configuration());
        assert!(!StxError::Validation("v".into()).is_configuration());
    }
}
