//! Status, error and event queries across registered servers.

use serde::{Deserialize, Serialize};

use crate::config::Target;
use crate::fanout::{fan_out, Outcome, TargetResult};
use crate::syncthing_client::api::{EventsQuery, SyncthingEvent, SystemError};
use crate::syncthing_client::models::ServerStatus;
use crate::syncthing_client::DataAggregator;
use crate::types::StxError;

/// Server-side wait bound for one-shot event queries, in seconds.
pub const EVENTS_WAIT_SECS: u64 = 1;

/// Per-server results of one query kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregated<T> {
    pub servers: Vec<TargetResult<T>>,
}

impl<T> Aggregated<T> {
    pub fn failed(&self) -> usize {
        self.servers.iter().filter(|s| !s.is_ok()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorsPayload {
    pub errors: Vec<SystemError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventsPayload {
    pub events: Vec<SyncthingEvent>,
}

/// Outcome of clearing one server's error list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearResult {
    pub server: String,
    pub cleared: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<TargetResult<()>> for ClearResult {
    fn from(result: TargetResult<()>) -> Self {
        let error = match result.outcome {
            Outcome::Payload(()) => None,
            Outcome::Failed { error } => Some(error),
        };
        Self {
            server: result.server,
            cleared: error.is_none(),
            error,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventsOptions {
    pub since: Option<u64>,
    pub limit: Option<u32>,
    pub types: Vec<String>,
}

pub async fn fetch_server_status(target: &Target) -> TargetResult<ServerStatus> {
    TargetResult::capture(target, |client| async move {
        DataAggregator::new(&client).compose_status().await
    })
    .await
}

pub async fn fetch_all_servers_status(targets: &[Target]) -> Aggregated<ServerStatus> {
    let servers = fan_out(targets, |client| async move {
        DataAggregator::new(&client).compose_status().await
    })
    .await;
    Aggregated { servers }
}

pub async fn fetch_all_servers_errors(targets: &[Target]) -> Aggregated<ErrorsPayload> {
    let servers = fan_out(targets, |client| async move {
        let errors = client.errors().await?;
        Ok::<_, StxError>(ErrorsPayload { errors })
    })
    .await;
    Aggregated { servers }
}

pub async fn clear_all_servers_errors(targets: &[Target]) -> Vec<ClearResult> {
    fan_out(targets, |client| async move { client.clear_errors().await })
        .await
        .into_iter()
        .map(ClearResult::from)
        .collect()
}

/// Events from a single server; filters are passed through verbatim.
pub async fn fetch_server_events(
    target: &Target,
    options: &EventsOptions,
) -> TargetResult<EventsPayload> {
    let query = EventsQuery {
        since: options.since,
        limit: options.limit,
        events: None,
        timeout: Some(EVENTS_WAIT_SECS),
    }
    .with_types(&options.types);

    TargetResult::capture(target, |client| async move {
        let events = client.events(&query).await?;
        Ok::<_, StxError>(EventsPayload { events })
    })
    .await
}
