//! Git queries used by identity resolution.
//!
//! The commands executed are:
//! - `git rev-parse --abbrev-ref HEAD` — current branch name
//! - `git rev-parse --show-toplevel` — absolute path of the repository root
//!
//! Any failure (git missing, non-zero exit, timeout, empty output) yields
//! `None` rather than an error: identity resolution treats git degradation
//! as "not resolvable at this step" and keeps falling through its chain.

use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::process::run_with_timeout;

/// Deadline for each git query. Generous for a local rev-parse; its real
/// job is catching a git that hangs on a wedged filesystem.
const GIT_TIMEOUT: Duration = Duration::from_secs(5);

fn git_line(cwd: &Path, args: &[&str]) -> Option<String> {
    let output = match run_with_timeout("git", args, Some(cwd), GIT_TIMEOUT) {
        Ok(output) => output,
        Err(e) => {
            debug!("git {args:?} failed: {e}");
            return None;
        }
    };
    if !output.success {
        return None;
    }
    let line = output.stdout.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

/// Current branch name in `cwd`, or `None` when unresolvable.
pub fn current_branch(cwd: &Path) -> Option<String> {
    git_line(cwd, &["rev-parse", "--abbrev-ref", "HEAD"])
}

/// Basename of the repository toplevel containing `cwd`, or `None`.
pub fn toplevel_basename(cwd: &Path) -> Option<String> {
    let toplevel = git_line(cwd, &["rev-parse", "--show-toplevel"])?;
    Path::new(&toplevel)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
}
