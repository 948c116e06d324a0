//! Per-workspace status store.
//!
//! One JSON file per workspace identifier under the store root. Every write
//! fully replaces the file — last-write-wins, no history, no merging, no
//! locking. Concurrent hook invocations racing on the same workspace may
//! drop an intermediate status; the record is an advisory UI signal, not a
//! consistency-critical store, and that loss is an accepted trade-off.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while persisting a status record.
#[derive(Error, Debug)]
pub enum StoreError {
    /// File I/O error
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to serialize the record
    #[error("JSON serialization error: {source}")]
    Json { source: serde_json::Error },
}

/// The persisted summary of a workspace's most recent lifecycle event.
///
/// Wire format is camelCase to match what the UI consumes. Optional fields
/// are omitted entirely when absent, so a rewrite without a tool name also
/// clears any previously stored `currentTool`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusRecord {
    /// Last known session token, `"unknown"` when never seen.
    pub session_id: String,
    /// The workspace identifier this record is keyed by.
    pub workspace_name: String,
    /// Current status. A plain string because the override path accepts
    /// arbitrary values verbatim.
    pub status: String,
    /// Milliseconds since epoch, set on every write.
    pub last_update: i64,
    /// Tool named by the triggering event, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_tool: Option<String>,
    /// Raw event name that produced this write, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    /// Working directory reported by the event, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
}

impl StatusRecord {
    /// Assemble a record stamped with the current wall clock.
    pub fn new(session_id: String, workspace_name: String, status: String) -> Self {
        Self {
            session_id,
            workspace_name,
            status,
            last_update: Utc::now().timestamp_millis(),
            current_tool: None,
            event: None,
            cwd: None,
        }
    }
}

/// Directory of one status record per workspace identifier.
#[derive(Debug, Clone)]
pub struct StatusStore {
    root: PathBuf,
}

impl StatusStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The file a given workspace's record lives in. Deterministic:
    /// `<root>/<workspace>.json`.
    pub fn path_for(&self, workspace: &str) -> PathBuf {
        self.root.join(format!("{workspace}.json"))
    }

    /// Persist `record` as the sole current state for its workspace,
    /// creating the store root if absent. Whole-file replacement.
    pub fn write(&self, record: &StatusRecord) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|e| StoreError::Io {
            path: self.root.clone(),
            source: e,
        })?;

        let path = self.path_for(&record.workspace_name);
        let json =
            serde_json::to_string_pretty(record).map_err(|e| StoreError::Json { source: e })?;
        fs::write(&path, json).map_err(|e| StoreError::Io { path, source: e })
    }

    /// Read the record for `workspace`, if one exists and parses.
    pub fn read(&self, workspace: &str) -> Option<StatusRecord> {
        let content = fs::read_to_string(self.path_for(workspace)).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
