//! Process-level configuration.
//!
//! Environment is read exactly once, at process start, into an explicit
//! [`Config`] that flows into the dispatcher and store. Derivation and
//! storage logic never look at the environment themselves.

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::home::get_home_dir;
use crate::tracker::Provider;

/// Directory under the home dir holding all relay state.
const RELAY_DIR: &str = ".agent-status-relay";

/// How far up from cwd provider discovery will walk before giving up.
const DISCOVERY_DEPTH: usize = 20;

/// Resolved configuration for one hook invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where status records are written. `ASR_STATUS_DIR` when set,
    /// otherwise `<home>/.agent-status-relay/claude-status`.
    pub status_dir: PathBuf,
    /// Where per-issue metadata lives: `<home>/.agent-status-relay/issue-meta`.
    pub meta_dir: PathBuf,
    /// Session token from `CLAUDE_SESSION_ID`, used when the payload does
    /// not carry one.
    pub session_fallback: Option<String>,
}

impl Config {
    /// Build the configuration from the environment. Called once, in main.
    pub fn from_env() -> Result<Self> {
        let home = get_home_dir()?;
        let status_dir = match std::env::var("ASR_STATUS_DIR") {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir.trim()),
            _ => home.join(RELAY_DIR).join("claude-status"),
        };
        let meta_dir = home.join(RELAY_DIR).join("issue-meta");
        let session_fallback = std::env::var("CLAUDE_SESSION_ID").ok();

        Ok(Self {
            status_dir,
            meta_dir,
            session_fallback,
        })
    }
}

/// Shape of `.asr.toml`, the per-project relay config.
#[derive(Debug, Default, Deserialize)]
struct ProjectConfig {
    #[serde(default)]
    tracker: TrackerSection,
}

#[derive(Debug, Default, Deserialize)]
struct TrackerSection {
    provider: Option<String>,
}

/// Discover the issue-tracker provider for `cwd`.
///
/// Walks up from `cwd` (bounded) looking for `.asr.toml` with a
/// `[tracker] provider` entry. Missing file, unparseable file, or an
/// unrecognized provider name all fall back to [`Provider::Linear`].
pub fn tracker_provider(cwd: &Path) -> Provider {
    let mut current = cwd;
    for _ in 0..DISCOVERY_DEPTH {
        let candidate = current.join(".asr.toml");
        if candidate.is_file() {
            return provider_from_file(&candidate);
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }
    Provider::Linear
}

fn provider_from_file(path: &Path) -> Provider {
    let parsed: ProjectConfig = std::fs::read_to_string(path)
        .ok()
        .and_then(|content| toml::from_str(&content).ok())
        .unwrap_or_default();
    match parsed.tracker.provider.as_deref() {
        Some("jira") => Provider::Jira,
        _ => Provider::Linear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn status_dir_env_override_wins() {
        let home_orig = env::var("ASR_HOME").ok();
        let dir_orig = env::var("ASR_STATUS_DIR").ok();
        unsafe {
            env::set_var("ASR_HOME", "/home/fixture");
            env::set_var("ASR_STATUS_DIR", "/custom/status");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.status_dir, PathBuf::from("/custom/status"));
        assert_eq!(
            config.meta_dir,
            PathBuf::from("/home/fixture/.agent-status-relay/issue-meta")
        );

        unsafe {
            match home_orig {
                Some(v) => env::set_var("ASR_HOME", v),
                None => env::remove_var("ASR_HOME"),
            }
            match dir_orig {
                Some(v) => env::set_var("ASR_STATUS_DIR", v),
                None => env::remove_var("ASR_STATUS_DIR"),
            }
        }
    }

    #[test]
    #[serial]
    fn status_dir_defaults_under_home() {
        let home_orig = env::var("ASR_HOME").ok();
        let dir_orig = env::var("ASR_STATUS_DIR").ok();
        unsafe {
            env::set_var("ASR_HOME", "/home/fixture");
            env::remove_var("ASR_STATUS_DIR");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(
            config.status_dir,
            PathBuf::from("/home/fixture/.agent-status-relay/claude-status")
        );

        unsafe {
            match home_orig {
                Some(v) => env::set_var("ASR_HOME", v),
                None => env::remove_var("ASR_HOME"),
            }
            if let Some(v) = dir_orig {
                env::set_var("ASR_STATUS_DIR", v);
            }
        }
    }

    #[test]
    fn provider_defaults_to_linear_without_config() {
        let dir = TempDir::new().unwrap();
        assert_eq!(tracker_provider(dir.path()), Provider::Linear);
    }

    #[test]
    fn provider_discovered_from_parent_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".asr.toml"),
            "[tracker]\nprovider = \"jira\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b").join("c");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(tracker_provider(&nested), Provider::Jira);
    }

    #[test]
    fn unrecognized_provider_falls_back_to_linear() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".asr.toml"),
            "[tracker]\nprovider = \"fogbugz\"\n",
        )
        .unwrap();
        assert_eq!(tracker_provider(dir.path()), Provider::Linear);
    }

    #[test]
    fn corrupt_config_falls_back_to_linear() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".asr.toml"), "not [valid toml").unwrap();
        assert_eq!(tracker_provider(dir.path()), Provider::Linear);
    }
}
