//! Per-issue metadata store.
//!
//! One JSON file per issue key under `<home>/.agent-status-relay/issue-meta`,
//! written by the workspace-creation tooling and consulted by the
//! plan-posting hook to decide between "set the description" (issues the
//! relay created, still carrying a placeholder) and "add a comment"
//! (pre-existing issues being resumed).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Metadata recorded about one issue.
///
/// Unknown fields are preserved on rewrite via `extra`, since other tooling
/// owns parts of this file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueMeta {
    /// Whether the relay tooling created this issue (vs. resuming one that
    /// already existed).
    #[serde(default)]
    pub created_by_relay: bool,
    /// Whether an accepted plan has already been posted.
    #[serde(default)]
    pub plan_posted: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Error, Debug)]
pub enum MetaError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Issue metadata directory.
#[derive(Debug, Clone)]
pub struct MetaStore {
    root: PathBuf,
}

impl MetaStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn path_for(&self, issue_key: &str) -> PathBuf {
        self.root.join(format!("{issue_key}.json"))
    }

    /// Whether `issue_key` was created by the relay tooling.
    ///
    /// Missing or corrupt metadata means "assume it already existed" — the
    /// safe default, since commenting on an existing issue is harmless
    /// while overwriting a real description is not.
    pub fn is_new_issue(&self, issue_key: &str) -> bool {
        self.load(issue_key)
            .map(|meta| meta.created_by_relay)
            .unwrap_or(false)
    }

    /// Record that an accepted plan has been posted for `issue_key`,
    /// preserving any other fields already in the file.
    pub fn mark_plan_posted(&self, issue_key: &str) -> Result<(), MetaError> {
        let mut meta = self.load(issue_key).unwrap_or_default();
        meta.plan_posted = true;

        std::fs::create_dir_all(&self.root).map_err(|e| MetaError::Io {
            path: self.root.clone(),
            source: e,
        })?;
        let path = self.path_for(issue_key);
        let json = serde_json::to_string_pretty(&meta).map_err(|e| MetaError::Json {
            path: path.clone(),
            source: e,
        })?;
        std::fs::write(&path, json).map_err(|e| MetaError::Io { path, source: e })
    }

    fn load(&self, issue_key: &str) -> Option<IssueMeta> {
        let content = std::fs::read_to_string(self.path_for(issue_key)).ok()?;
        serde_json::from_str(&content).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_metadata_means_existing_issue() {
        let dir = TempDir::new().unwrap();
        let store = MetaStore::new(dir.path().to_path_buf());
        assert!(!store.is_new_issue("STA-123"));
    }

    #[test]
    fn corrupt_metadata_means_existing_issue() {
        let dir = TempDir::new().unwrap();
        let store = MetaStore::new(dir.path().to_path_buf());
        std::fs::write(dir.path().join("STA-123.json"), "{broken").unwrap();
        assert!(!store.is_new_issue("STA-123"));
    }

    #[test]
    fn created_by_relay_flag_is_read() {
        let dir = TempDir::new().unwrap();
        let store = MetaStore::new(dir.path().to_path_buf());
        std::fs::write(
            dir.path().join("STA-123.json"),
            r#"{"created_by_relay": true}"#,
        )
        .unwrap();
        assert!(store.is_new_issue("STA-123"));
    }

    #[test]
    fn mark_plan_posted_creates_file_when_absent() {
        let dir = TempDir::new().unwrap();
        let store = MetaStore::new(dir.path().join("meta"));
        store.mark_plan_posted("STA-7").unwrap();

        let raw = std::fs::read_to_string(dir.path().join("meta/STA-7.json")).unwrap();
        let meta: IssueMeta = serde_json::from_str(&raw).unwrap();
        assert!(meta.plan_posted);
        assert!(!meta.created_by_relay);
    }

    #[test]
    fn mark_plan_posted_preserves_foreign_fields() {
        let dir = TempDir::new().unwrap();
        let store = MetaStore::new(dir.path().to_path_buf());
        std::fs::write(
            dir.path().join("STA-8.json"),
            r#"{"created_by_relay": true, "branch": "sta-8-fix"}"#,
        )
        .unwrap();

        store.mark_plan_posted("STA-8").unwrap();

        let raw = std::fs::read_to_string(dir.path().join("STA-8.json")).unwrap();
        assert!(raw.contains("plan_posted"));
        assert!(raw.contains("sta-8-fix"), "foreign fields must survive");
        assert!(raw.contains("created_by_relay"));
    }
}
