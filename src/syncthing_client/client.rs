use std::fmt;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::types::StxError;

use super::api::{
    ConnectionsResponse, DaemonConfig, ErrorsResponse, EventsQuery, FolderStatus,
    FolderStatusQuery, IgnoresBody, SyncthingEvent, SystemError, SystemStatus,
};

/// Deadline for every control-API call except the events long-poll.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Added on top of the server-side wait bound of an events long-poll.
const LONG_POLL_MARGIN: Duration = Duration::from_secs(10);

const API_KEY_HEADER: &str = "X-API-Key";

/// Stateless binding to one daemon's REST control API.
///
/// Every call is a single request/response without retry.
#[derive(Clone)]
pub struct SyncthingClient {
    base_url: String,
    api_key: Option<String>,
    http: Client,
}

impl fmt::Debug for SyncthingClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncthingClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| crate::redact::REDACTED))
            .finish()
    }
}

impl SyncthingClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, StxError> {
        // Daemons serve self-signed certificates on their GUI port.
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self::with_http(http, base_url, api_key))
    }

    pub fn with_http(http: Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /rest/noauth/deviceid`, answered without credentials.
    pub async fn device_id(&self) -> Result<String, StxError> {
        let path = "/rest/noauth/deviceid";
        let request = self.http.get(self.url(path));
        let text = self.execute(Method::GET, path, request).await?;
        Ok(text.trim().to_string())
    }

    pub async fn config(&self) -> Result<DaemonConfig, StxError> {
        self.get_json("/rest/system/config").await
    }

    /// Replaces the whole daemon configuration. Callers read-modify-write.
    pub async fn put_config(&self, config: &DaemonConfig) -> Result<(), StxError> {
        self.send_json(Method::PUT, "/rest/system/config", &(), Some(config))
            .await
    }

    pub async fn system_status(&self) -> Result<SystemStatus, StxError> {
        self.get_json("/rest/system/status").await
    }

    pub async fn connections(&self) -> Result<ConnectionsResponse, StxError> {
        self.get_json("/rest/system/connections").await
    }

    pub async fn folder_status(&self, folder_id: &str) -> Result<FolderStatus, StxError> {
        let query = FolderStatusQuery { folder: folder_id };
        self.get_json_with_query("/rest/db/status", &query).await
    }

    pub async fn errors(&self) -> Result<Vec<SystemError>, StxError> {
        let response: ErrorsResponse = self.get_json("/rest/system/error").await?;
        Ok(response.errors.unwrap_or_default())
    }

    pub async fn clear_errors(&self) -> Result<(), StxError> {
        self.send_json::<_, ()>(Method::POST, "/rest/system/error/clear", &(), None)
            .await
    }

    /// Events ascending by id. `query.timeout` bounds the server-side wait.
    pub async fn events(&self, query: &EventsQuery) -> Result<Vec<SyncthingEvent>, StxError> {
        let path = "/rest/events";
        let mut request = self.authorized(self.http.get(self.url(path))).query(query);
        if let Some(wait) = query.timeout {
            request = request.timeout(Duration::from_secs(wait) + LONG_POLL_MARGIN);
        }
        let text = self.execute(Method::GET, path, request).await?;
        let mut events: Vec<SyncthingEvent> = decode(&Method::GET, path, &text)?;
        events.sort_by_key(|event| event.id);
        Ok(events)
    }

    pub async fn set_ignores(&self, folder_id: &str, lines: &[String]) -> Result<(), StxError> {
        let query = FolderStatusQuery { folder: folder_id };
        self.send_json(
            Method::POST,
            "/rest/db/ignores",
            &query,
            Some(&IgnoresBody { ignore: lines }),
        )
        .await
    }

    pub async fn restart(&self) -> Result<(), StxError> {
        self.send_json::<_, ()>(Method::POST, "/rest/system/restart", &(), None)
            .await
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, StxError>
    where
        T: DeserializeOwned,
    {
        self.get_json_with_query(path, &()).await
    }

    async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, StxError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.authorized(self.http.get(self.url(path))).query(query);
        let text = self.execute(Method::GET, path, request).await?;
        decode(&Method::GET, path, &text)
    }

    async fn send_json<Q, B>(
        &self,
        method: Method,
        path: &str,
        query: &Q,
        body: Option<&B>,
    ) -> Result<(), StxError>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let mut request = self
            .authorized(self.http.request(method.clone(), self.url(path)))
            .query(query);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(method, path, request).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Accept", "application/json");
        match &self.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<String, StxError> {
        debug!(method = %method, url = %self.url(path), "Syncthing request");
        let transport = |source| StxError::Transport {
            method: method.to_string(),
            path: path.to_string(),
            source,
        };
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(StxError::Api {
                method: method.to_string(),
                path: path.to_string(),
                status: Some(status.as_u16()),
                body: body.trim().to_string(),
            });
        }

        Ok(body)
    }
}

fn decode<T: DeserializeOwned>(method: &Method, path: &str, text: &str) -> Result<T, StxError> {
    serde_json::from_str(text).map_err(|source| StxError::Decode {
        method: method.to_string(),
        path: path.to_string(),
        source,
    })
}
