use chrono::SecondsFormat;

use crate::fanout::TargetResult;
use crate::pairing::{PairOutcome, PairRole};
use crate::queries::{Aggregated, ClearResult, ErrorsPayload, EventsPayload};
use crate::syncthing_client::models::ServerStatus;

const SHORT_ID_LEN: usize = 7;

/// `Hh Mm` for an uptime in seconds.
pub fn format_uptime(seconds: u64) -> String {
    format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
}

/// Bytes as mebibytes with one decimal.
pub fn to_megabytes(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / 1024.0 / 1024.0)
}

/// First seven characters of a device id followed by `...`.
pub fn short_id(device_id: &str) -> String {
    let head: String = device_id.chars().take(SHORT_ID_LEN).collect();
    format!("{head}...")
}

fn header<T>(lines: &mut Vec<String>, result: &TargetResult<T>) {
    lines.push(format!("=== {} ({}) ===", result.server, result.url));
}

pub fn format_status_text(status: &Aggregated<ServerStatus>) -> String {
    let mut lines = Vec::new();

    for result in &status.servers {
        header(&mut lines, result);
        let Some(s) = result.payload() else {
            lines.push(format!("  ERROR: {}", result.error().unwrap_or_default()));
            lines.push(String::new());
            continue;
        };

        lines.push(format!("  Device ID: {}", short_id(&s.system.device_id)));
        lines.push(format!("  Uptime: {}", format_uptime(s.system.uptime)));

        if !s.folders.is_empty() {
            lines.push(String::new());
            lines.push("  Folders:".to_string());
            for f in &s.folders {
                lines.push(format!("    - {} ({}): {}", f.label, f.id, f.state));
                lines.push(format!(
                    "      Global: {} MB, Local: {} MB",
                    to_megabytes(f.global_bytes),
                    to_megabytes(f.local_bytes)
                ));
                if f.pull_errors > 0 {
                    lines.push(format!("      Pull Errors: {}", f.pull_errors));
                }
            }
        }

        if !s.devices.is_empty() {
            lines.push(String::new());
            lines.push("  Devices:".to_string());
            for d in &s.devices {
                let state = if d.connected { "connected" } else { "disconnected" };
                lines.push(format!("    - {} ({}): {state}", d.name, short_id(&d.device_id)));
                if let (true, Some(version)) = (d.connected, &d.client_version) {
                    lines.push(format!("      Version: {version}"));
                }
            }
        }

        lines.push(String::new());
    }

    lines.join("\n")
}

pub fn format_errors_text(data: &Aggregated<ErrorsPayload>) -> String {
    let mut lines = Vec::new();

    for result in &data.servers {
        header(&mut lines, result);
        match result.payload() {
            None => lines.push(format!("  ERROR: {}", result.error().unwrap_or_default())),
            Some(payload) if payload.errors.is_empty() => lines.push("  No errors".to_string()),
            Some(payload) => {
                for e in &payload.errors {
                    lines.push(format!(
                        "  [{}] {}",
                        e.when.to_rfc3339_opts(SecondsFormat::Secs, true),
                        e.message
                    ));
                }
            }
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

pub fn format_clear_text(results: &[ClearResult]) -> String {
    results
        .iter()
        .map(|r| match &r.error {
            None => format!("{}: cleared", r.server),
            Some(error) => format!("{}: ERROR: {error}", r.server),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_events_text(data: &TargetResult<EventsPayload>) -> String {
    let mut lines = Vec::new();
    header(&mut lines, data);

    match data.payload() {
        None => lines.push(format!("  ERROR: {}", data.error().unwrap_or_default())),
        Some(payload) if payload.events.is_empty() => lines.push("  No events".to_string()),
        Some(payload) => {
            for e in &payload.events {
                lines.push(format!(
                    "  [{}] {} - {}",
                    e.id,
                    e.time.to_rfc3339_opts(SecondsFormat::Secs, true),
                    e.event_type
                ));
                let has_data = match &e.data {
                    serde_json::Value::Null => false,
                    serde_json::Value::Object(map) => !map.is_empty(),
                    _ => true,
                };
                if has_data {
                    lines.push(format!("      {}", e.data));
                }
            }
        }
    }

    lines.join("\n")
}

pub fn format_pair_text(outcome: &PairOutcome) -> String {
    let mut lines = vec![
        "OK".to_string(),
        format!("  Folder ID: {}", outcome.folder_id),
        format!(
            "  Local:  {} ({})",
            outcome.local_path,
            PairRole::Local.describe()
        ),
        format!(
            "  Server: {}:{} ({})",
            outcome.server,
            outcome.server_path,
            PairRole::Server.describe()
        ),
    ];

    if !outcome.fully_applied() {
        let failures = outcome
            .ignores
            .iter()
            .map(|s| ("ignores", s))
            .chain(outcome.restarts.iter().map(|s| ("restart", s)))
            .filter(|(_, s)| !s.ok);
        lines.push(String::new());
        lines.push("  Warnings:".to_string());
        for (step, report) in failures {
            lines.push(format!(
                "    - {step} on {}: {}",
                report.target,
                report.error.as_deref().unwrap_or("failed")
            ));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fanout::Outcome;
    use crate::pairing::StepReport;
    use crate::syncthing_client::api::{SyncthingEvent, SystemError};
    use crate::syncthing_client::models::{DeviceInfo, FolderInfo, SystemSummary};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn ok<T>(server: &str, payload: T) -> TargetResult<T> {
        TargetResult {
            server: server.to_string(),
            url: format!("http://{server}:8384"),
            outcome: Outcome::Payload(payload),
        }
    }

    fn failed<T>(server: &str, error: &str) -> TargetResult<T> {
        TargetResult {
            server: server.to_string(),
            url: format!("http://{server}:8384"),
            outcome: Outcome::Failed {
                error: error.to_string(),
            },
        }
    }

    fn sample_status() -> ServerStatus {
        ServerStatus {
            system: SystemSummary {
                device_id: "ABCDEFG-HIJKLMN".to_string(),
                uptime: 7265,
                start_time: None,
            },
            folders: vec![FolderInfo {
                id: "f1".to_string(),
                label: "Project".to_string(),
                state: "idle".to_string(),
                global_bytes: 1_572_864,
                local_bytes: 1_048_576,
                need_bytes: 0,
                pull_errors: 2,
                completion: 100.0,
            }],
            devices: vec![
                DeviceInfo {
                    device_id: "PEERONE-XXXX".to_string(),
                    name: "laptop".to_string(),
                    connected: true,
                    address: None,
                    client_version: Some("v1.27.0".to_string()),
                    in_bytes_total: None,
                    out_bytes_total: None,
                },
                DeviceInfo {
                    device_id: "PEERTWO-YYYY".to_string(),
                    name: "desktop".to_string(),
                    connected: false,
                    address: None,
                    client_version: Some("v1.26.0".to_string()),
                    in_bytes_total: None,
                    out_bytes_total: None,
                },
            ],
        }
    }

    #[test]
    fn uptime_and_sizes() {
        assert_eq!(format_uptime(7265), "2h 1m");
        assert_eq!(format_uptime(59), "0h 0m");
        assert_eq!(to_megabytes(1_572_864), "1.5");
        assert_eq!(to_megabytes(0), "0.0");
        assert_eq!(short_id("ABC"), "ABC...");
    }

    #[test]
    fn status_layout() {
        let status = Aggregated {
            servers: vec![ok("safe-101", sample_status()), failed("safe-102", "connection refused")],
        };
        let text = format_status_text(&status);

        assert!(text.contains("=== safe-101 (http://safe-101:8384) ==="));
        assert!(text.contains("  Device ID: ABCDEFG..."));
        assert!(text.contains("  Uptime: 2h 1m"));
        assert!(text.contains("    - Project (f1): idle"));
        assert!(text.contains("      Global: 1.5 MB, Local: 1.0 MB"));
        assert!(text.contains("      Pull Errors: 2"));
        assert!(text.contains("    - laptop (PEERONE...): connected"));
        assert!(text.contains("      Version: v1.27.0"));
        assert!(text.contains("    - desktop (PEERTWO...): disconnected"));
        assert!(!text.contains("v1.26.0"));
        assert!(text.contains("=== safe-102 (http://safe-102:8384) ===\n  ERROR: connection refused"));
    }

    #[test]
    fn errors_layout() {
        let when = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let data = Aggregated {
            servers: vec![
                ok(
                    "a",
                    ErrorsPayload {
                        errors: vec![SystemError {
                            when,
                            message: "folder f1: path missing".to_string(),
                        }],
                    },
                ),
                ok("b", ErrorsPayload { errors: vec![] }),
            ],
        };
        let text = format_errors_text(&data);
        assert!(text.contains("  [2024-01-02T03:04:05Z] folder f1: path missing"));
        assert!(text.contains("=== b (http://b:8384) ===\n  No errors"));
    }

    #[test]
    fn clear_layout() {
        let text = format_clear_text(&[
            ClearResult {
                server: "a".to_string(),
                cleared: true,
                error: None,
            },
            ClearResult {
                server: "b".to_string(),
                cleared: false,
                error: Some("HTTP 403".to_string()),
            },
        ]);
        assert_eq!(text, "a: cleared\nb: ERROR: HTTP 403");
    }

    #[test]
    fn events_layout() {
        let time = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let data = ok(
            "a",
            EventsPayload {
                events: vec![
                    SyncthingEvent {
                        id: 7,
                        global_id: None,
                        time,
                        event_type: "StateChanged".to_string(),
                        data: json!({"folder": "f1"}),
                    },
                    SyncthingEvent {
                        id: 8,
                        global_id: None,
                        time,
                        event_type: "Ping".to_string(),
                        data: json!({}),
                    },
                ],
            },
        );
        let text = format_events_text(&data);
        assert!(text.contains("  [7] 2024-01-01T00:00:00Z - StateChanged\n      {\"folder\":\"f1\"}"));
        assert!(text.ends_with("  [8] 2024-01-01T00:00:00Z - Ping"));

        let empty = format_events_text(&ok("a", EventsPayload { events: vec![] }));
        assert!(empty.ends_with("No events"));
    }

    #[test]
    fn pair_layout_lists_warnings_only_on_failure() {
        let mut outcome = PairOutcome {
            folder_id: "project-1a2b".to_string(),
            server: "safe-101".to_string(),
            local_path: "/Users/me/p".to_string(),
            server_path: "/data/p".to_string(),
            ignores: vec![StepReport {
                target: "safe-101".to_string(),
                ok: true,
                error: None,
            }],
            restarts: vec![],
        };
        let text = format_pair_text(&outcome);
        assert!(text.starts_with("OK\n  Folder ID: project-1a2b"));
        assert!(text.contains("/Users/me/p (Send&Receive)"));
        assert!(text.contains("safe-101:/data/p (ReceiveOnly)"));
        assert!(!text.contains("Warnings"));

        outcome.restarts.push(StepReport {
            target: "local".to_string(),
            ok: false,
            error: Some("HTTP 500".to_string()),
        });
        assert!(!outcome.fully_applied());
        let text = format_pair_text(&outcome);
        assert!(text.contains("\n\n  Warnings:\n    - restart on local: HTTP 500"));
        assert!(!text.contains("ignores on"));
    }
}
