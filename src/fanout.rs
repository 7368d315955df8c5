//! Run one read against many independent daemons and keep a result per daemon.

use std::future::Future;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::Target;
use crate::syncthing_client::SyncthingClient;
use crate::types::StxError;

/// Either the payload of a target or the message of its failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    Failed { error: String },
    Payload(T),
}

/// Result for one target. Serialises as `{server, url, error}` or
/// `{server, url, ...payload}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetResult<T> {
    pub server: String,
    pub url: String,
    #[serde(flatten)]
    pub outcome: Outcome<T>,
}

impl<T> TargetResult<T> {
    pub fn payload(&self) -> Option<&T> {
        match &self.outcome {
            Outcome::Payload(payload) => Some(payload),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Failed { error } => Some(error),
            Outcome::Payload(_) => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, Outcome::Payload(_))
    }

    /// Run `op` against `target`, turning any failure into an error entry.
    pub async fn capture<F, Fut>(target: &Target, op: F) -> Self
    where
        F: FnOnce(SyncthingClient) -> Fut,
        Fut: Future<Output = Result<T, StxError>>,
    {
        let result = match target.client() {
            Ok(client) => op(client).await,
            Err(err) => Err(err),
        };
        let outcome = match result {
            Ok(payload) => Outcome::Payload(payload),
            Err(err) => {
                warn!(target = %target.name, error = %err, "Target query failed");
                Outcome::Failed {
                    error: err.to_string(),
                }
            }
        };
        Self {
            server: target.name.clone(),
            url: target.base_url.clone(),
            outcome,
        }
    }
}

/// Query every target concurrently and wait for all of them.
///
/// The output holds exactly one entry per target, in input order. A failing
/// target never cancels or alters the others.
pub async fn fan_out<T, F, Fut>(targets: &[Target], op: F) -> Vec<TargetResult<T>>
where
    F: Fn(SyncthingClient) -> Fut,
    Fut: Future<Output = Result<T, StxError>>,
{
    join_all(
        targets
            .iter()
            .map(|target| TargetResult::capture(target, &op)),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn device_id_server(status: u16, body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/noauth/deviceid"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn every_target_gets_exactly_one_entry() {
        let ok_a = device_id_server(200, "AAA").await;
        let bad = device_id_server(500, "boom").await;
        let ok_b = device_id_server(200, "BBB").await;
        let targets = vec![
            Target::new("a", ok_a.uri(), "k"),
            Target::new("bad", bad.uri(), "k"),
            Target::new("b", ok_b.uri(), "k"),
            Target::new("down", "http://127.0.0.1:1", "k"),
        ];

        let results = fan_out(&targets, |client| async move { client.device_id().await }).await;

        assert_eq!(results.len(), 4);
        let names: Vec<_> = results.iter().map(|r| r.server.as_str()).collect();
        assert_eq!(names, vec!["a", "bad", "b", "down"]);
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 2);
        assert_eq!(results[0].payload().map(String::as_str), Some("AAA"));
        assert_eq!(results[2].payload().map(String::as_str), Some("BBB"));
        assert!(results[1].error().unwrap().contains("500"));
        assert!(results[3].error().is_some());
    }

    #[tokio::test]
    async fn failures_do_not_alter_successful_payloads() {
        let ok = device_id_server(200, "SAME-ID").await;
        let bad = device_id_server(503, "unavailable").await;

        let alone = fan_out(&[Target::new("ok", ok.uri(), "k")], |client| async move {
            client.device_id().await
        })
        .await;
        let mixed = fan_out(
            &[Target::new("bad", bad.uri(), "k"), Target::new("ok", ok.uri(), "k")],
            |client| async move { client.device_id().await },
        )
        .await;

        let ok_mixed = mixed.iter().find(|r| r.server == "ok").unwrap();
        assert_eq!(ok_mixed, &alone[0]);
    }

    #[tokio::test]
    async fn empty_target_list() {
        let results: Vec<TargetResult<String>> =
            fan_out(&[], |client| async move { client.device_id().await }).await;
        assert!(results.is_empty());
    }

    #[test]
    fn serialises_flat() {
        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        struct Payload {
            cleared: bool,
        }
        let ok = TargetResult {
            server: "a".to_string(),
            url: "http://a".to_string(),
            outcome: Outcome::Payload(Payload { cleared: true }),
        };
        let failed: TargetResult<Payload> = TargetResult {
            server: "b".to_string(),
            url: "http://b".to_string(),
            outcome: Outcome::Failed {
                error: "nope".to_string(),
            },
        };
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"server": "a", "url": "http://a", "cleared": true})
        );
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"server": "b", "url": "http://b", "error": "nope"})
        );
    }
}
