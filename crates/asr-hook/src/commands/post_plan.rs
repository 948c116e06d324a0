//! Post an accepted plan to the issue tracker.
//!
//! Fires on `PostToolUse` for `ExitPlanMode` — i.e. when the user accepted
//! the plan. Issues created by the relay tooling get the plan as their
//! description (replacing the placeholder); pre-existing issues being
//! resumed get it as a comment. The plan text comes straight from the
//! tool's input payload, which carries the accepted plan verbatim.
//!
//! Like every hook, this is best-effort: outside an issue workspace, or
//! when anything goes wrong, it logs and returns cleanly.

use anyhow::Result;
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, warn};

use agent_status_relay_core::config::{tracker_provider, Config};
use agent_status_relay_core::event::{EventKind, HookPayload};
use agent_status_relay_core::meta::MetaStore;
use agent_status_relay_core::tracker::{post_comment, update_description};
use agent_status_relay_core::workspace::{issue_key_from_path, ScanOrder};

/// Execute the post-plan command
pub fn execute() -> Result<()> {
    let config = Config::from_env()?;

    let mut input = Vec::new();
    let _ = std::io::stdin().read_to_end(&mut input);
    let payload = HookPayload::from_stdin_bytes(&input);

    if payload.kind() != Some(EventKind::PostToolUse)
        || payload.tool_name.as_deref() != Some("ExitPlanMode")
    {
        return Ok(());
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    // Leaf-to-root: the innermost key-shaped segment names this worktree
    let Some(issue_key) = issue_key_from_path(&cwd, ScanOrder::LeafToRoot) else {
        debug!("not in an issue workspace, skipping plan post");
        return Ok(());
    };

    let Some(plan) = payload
        .tool_input
        .as_ref()
        .and_then(|v| v.get("plan"))
        .and_then(|v| v.as_str())
        .filter(|p| !p.trim().is_empty())
    else {
        warn!("ExitPlanMode payload carried no plan text");
        return Ok(());
    };

    let provider = tracker_provider(&cwd);
    let meta = MetaStore::new(config.meta_dir);

    let result = if meta.is_new_issue(&issue_key) {
        // Relay-created issue: its description is still the placeholder
        let body = format!("## Implementation Plan\n\n{plan}");
        update_description(provider, &issue_key, &body)
    } else {
        let body = format!("### Implementation Plan Accepted\n\n{plan}");
        post_comment(provider, &issue_key, &body)
    };

    match result {
        Ok(()) => {
            if let Err(e) = meta.mark_plan_posted(&issue_key) {
                warn!("plan posted but metadata update failed: {e}");
            }
        }
        Err(e) => warn!("failed to post plan to {issue_key}: {e}"),
    }

    Ok(())
}
