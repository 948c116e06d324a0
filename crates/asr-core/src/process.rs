//! Bounded synchronous child-process execution.
//!
//! Hooks are single-shot, run-to-completion processes, so collaborator
//! commands (git, tracker CLIs) run synchronously — but always under a
//! deadline, because a hung child would stall the assistant's hook
//! pipeline. The child is spawned with piped output and polled via
//! `try_wait`; on deadline expiry it is killed and reaped. stdout and
//! stderr are drained on background threads while the child runs, so a
//! child producing more than a pipe buffer of output still completes.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Poll interval while waiting on a child process.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Failure modes of a bounded child-process run.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The binary is not on `PATH`. Distinguished so callers can print an
    /// install hint instead of a generic failure.
    #[error("{program} not found on PATH")]
    NotInstalled { program: String },

    /// The child did not finish before the deadline and was killed.
    #[error("{program} timed out after {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    /// Spawning or reaping the child failed.
    #[error("failed to run {program}: {source}")]
    Io {
        program: String,
        source: std::io::Error,
    },
}

/// Captured result of a completed child process.
#[derive(Debug)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Drain a child output pipe to string on a background thread.
fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buf = String::new();
        let _ = pipe.read_to_string(&mut buf);
        buf
    })
}

fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    handle
        .map(|h| h.join().unwrap_or_default())
        .unwrap_or_default()
}

/// Run `program` with `args`, killing it if it exceeds `timeout`.
///
/// stdout/stderr are captured as UTF-8 (best-effort). A non-zero exit is
/// not an error here — callers inspect [`CommandOutput::success`] — but a
/// missing binary, a timeout, or a spawn failure is.
pub fn run_with_timeout(
    program: &str,
    args: &[&str],
    cwd: Option<&Path>,
    timeout: Duration,
) -> Result<CommandOutput, ProcessError> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let mut child = cmd.spawn().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ProcessError::NotInstalled {
                program: program.to_string(),
            }
        } else {
            ProcessError::Io {
                program: program.to_string(),
                source: e,
            }
        }
    })?;

    let stdout_reader = child.stdout.take().map(spawn_reader);
    let stderr_reader = child.stderr.take().map(spawn_reader);

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                return Ok(CommandOutput {
                    success: status.success(),
                    stdout: join_reader(stdout_reader),
                    stderr: join_reader(stderr_reader),
                });
            }
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    // Killing closes the pipes, so the readers finish on
                    // their own; their output is discarded with them.
                    return Err(ProcessError::Timeout {
                        program: program.to_string(),
                        timeout,
                    });
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                return Err(ProcessError::Io {
                    program: program.to_string(),
                    source: e,
                });
            }
        }
    }
}
