//! Issue-tracker CLI collaborator.
//!
//! Outbound writes go through the tracker's own CLI (`linctl` for Linear,
//! `acli` for Jira) with fixed argument shapes, never a direct API client.
//! Calls are bounded at 30 seconds, and a missing binary is a distinguished
//! failure carrying an install hint so hooks can print something useful.

use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::process::{run_with_timeout, CommandOutput, ProcessError};

const TRACKER_TIMEOUT: Duration = Duration::from_secs(30);

/// Supported issue-tracker backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Linear,
    Jira,
}

impl Provider {
    fn binary(self) -> &'static str {
        match self {
            Self::Linear => "linctl",
            Self::Jira => "acli",
        }
    }

    fn install_hint(self) -> &'static str {
        match self {
            Self::Linear => "install with: brew tap raegislabs/linctl && brew install linctl",
            Self::Jira => "install the Atlassian CLI",
        }
    }
}

/// Failure modes of a tracker call.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// The tracker CLI is not installed.
    #[error("{binary} not found - {hint}")]
    NotInstalled {
        binary: &'static str,
        hint: &'static str,
    },

    /// The call exceeded the bounded timeout.
    #[error("timed out talking to the tracker via {binary}")]
    Timeout { binary: &'static str },

    /// The CLI ran but reported failure.
    #[error("tracker command failed: {stderr}")]
    Failed { stderr: String },

    /// The CLI could not be executed at all.
    #[error("failed to invoke tracker CLI: {source}")]
    Io { source: std::io::Error },
}

/// Argument list for creating a comment on `key`.
pub fn comment_args<'a>(provider: Provider, key: &'a str, body: &'a str) -> Vec<&'a str> {
    match provider {
        Provider::Linear => vec!["comment", "create", key, "--body", body],
        Provider::Jira => vec!["jira", "workitem", "comment", "--key", key, "--body", body],
    }
}

/// Argument list for replacing the description of `key`.
pub fn update_args<'a>(provider: Provider, key: &'a str, body: &'a str) -> Vec<&'a str> {
    match provider {
        Provider::Linear => vec!["issue", "update", key, "--description", body],
        Provider::Jira => vec![
            "jira",
            "workitem",
            "update",
            "--key",
            key,
            "--description",
            body,
        ],
    }
}

/// Create a comment on the issue `key`.
pub fn post_comment(provider: Provider, key: &str, body: &str) -> Result<(), TrackerError> {
    run_tracker(provider, &comment_args(provider, key, body))
}

/// Replace the description of the issue `key`.
pub fn update_description(provider: Provider, key: &str, body: &str) -> Result<(), TrackerError> {
    run_tracker(provider, &update_args(provider, key, body))
}

fn run_tracker(provider: Provider, args: &[&str]) -> Result<(), TrackerError> {
    let binary = provider.binary();
    let output: CommandOutput = run_with_timeout(binary, args, None, TRACKER_TIMEOUT)
        .map_err(|e| match e {
            ProcessError::NotInstalled { .. } => TrackerError::NotInstalled {
                binary,
                hint: provider.install_hint(),
            },
            ProcessError::Timeout { .. } => TrackerError::Timeout { binary },
            ProcessError::Io { source, .. } => TrackerError::Io { source },
        })?;

    if output.success {
        Ok(())
    } else {
        warn!("{binary} exited non-zero: {}", output.stderr.trim());
        Err(TrackerError::Failed {
            stderr: output.stderr.trim().to_string(),
        })
    }
}
