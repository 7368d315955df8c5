//! Server-side path checks and preparation over ssh.

use std::path::{Component, Path};

use tokio::process::Command;
use tracing::info;

use crate::types::StxError;

/// Absolute paths that must never become a synced folder root.
const DANGEROUS_PATHS: &[&str] = &[
    "/", "/bin", "/boot", "/dev", "/etc", "/home", "/lib", "/lib64", "/opt", "/proc", "/root",
    "/run", "/sbin", "/sys", "/tmp", "/usr", "/var",
];

/// Reject empty paths, paths with `..` components and denylisted roots.
pub fn validate_server_path(path: &str) -> Result<(), StxError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(StxError::Validation("server path is empty".to_string()));
    }
    if Path::new(trimmed)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(StxError::Validation(format!(
            "server path {trimmed} must not contain '..'"
        )));
    }

    let normalized = match trimmed.trim_end_matches('/') {
        "" => "/",
        other => other,
    };
    if DANGEROUS_PATHS.contains(&normalized) {
        return Err(StxError::Validation(format!(
            "server path {trimmed} is a system directory"
        )));
    }
    Ok(())
}

/// `ssh <host> mkdir -p -- <path>` after validating the path.
pub async fn ensure_remote_dir(host: &str, path: &str) -> Result<(), StxError> {
    validate_server_path(path)?;
    info!(host = %host, path = %path, "Creating server path over ssh");
    run_command("ssh", &[host, "mkdir", "-p", "--", path]).await
}

pub async fn run_command(command: &str, args: &[&str]) -> Result<(), StxError> {
    let output = Command::new(command).args(args).output().await?;
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    Err(StxError::Command(if stderr.is_empty() {
        format!(
            "Command `{}` with args {:?} failed with status {}",
            command, args, output.status
        )
    } else {
        format!("Command `{}` with args {:?} failed: {}", command, args, stderr)
    }))
}
