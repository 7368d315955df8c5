use serde::Serialize;

#[derive(Serialize)]
pub struct FolderStatusQuery<'a> {
    pub folder: &'a str,
}

/// Query for `GET /rest/events`. `since` is an exclusive lower bound on the
/// event id; `timeout` is the server-side long-poll wait in seconds.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl EventsQuery {
    pub fn with_types(mut self, types: &[String]) -> Self {
        let joined = types
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(",");
        self.events = if joined.is_empty() { None } else { Some(joined) };
        self
    }
}
