//! Status command implementation: the event dispatcher.
//!
//! Reads exactly one event payload from stdin, resolves the workspace
//! identity, derives the status (or takes the caller's override verbatim),
//! and writes the merged record to the status store. Ignored events and
//! unparseable input produce no write and no error.

use anyhow::Result;
use clap::Args;
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

use agent_status_relay_core::config::Config;
use agent_status_relay_core::event::HookPayload;
use agent_status_relay_core::status::derive_status;
use agent_status_relay_core::store::{StatusRecord, StatusStore};
use agent_status_relay_core::workspace::workspace_name;

/// Update the workspace status record
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Explicit status to write verbatim, bypassing event derivation.
    /// Accepts any string; no validation is applied.
    status: Option<String>,

    /// Tool name to record alongside an explicit status
    #[arg(long)]
    tool: Option<String>,
}

/// Execute the status command
pub fn execute(args: StatusArgs) -> Result<()> {
    let config = Config::from_env()?;

    let mut input = Vec::new();
    let _ = std::io::stdin().read_to_end(&mut input);
    let payload = HookPayload::from_stdin_bytes(&input);

    // Override path first: an explicit status wins even over garbage stdin.
    let (status, tool) = if let Some(status) = args.status {
        (status, args.tool)
    } else {
        let Some(kind) = payload.kind() else {
            debug!("no recognizable event on stdin, skipping");
            return Ok(());
        };
        let Some(status) = derive_status(kind, payload.notification_type.as_deref()) else {
            debug!("event {kind:?} classified as ignore, skipping");
            return Ok(());
        };
        (status.as_str().to_string(), payload.tool_name.clone())
    };

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let workspace = workspace_name(&cwd);

    let session_id = payload
        .session_id
        .clone()
        .or_else(|| config.session_fallback.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let mut record = StatusRecord::new(session_id, workspace, status);
    record.current_tool = tool;
    record.event = payload.hook_event_name.clone();
    record.cwd = payload.cwd.clone();

    debug!(
        "writing status {} for workspace {}",
        record.status, record.workspace_name
    );
    let store = StatusStore::new(config.status_dir);
    store.write(&record)?;
    Ok(())
}
