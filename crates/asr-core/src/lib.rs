//! Core library for agent-status-relay (asr)
//!
//! Translates coding-assistant lifecycle events into a per-workspace status
//! record under `~/.agent-status-relay/claude-status/`, plus thin interfaces
//! to the collaborators the hooks shell out to (git, issue-tracker CLIs).
//!
//! The interesting parts live in three pure modules:
//! - [`workspace`] — workspace identity resolution (issue-key detection with
//!   both scan orders, git-based fallback naming)
//! - [`status`] — the event-to-status derivation table
//! - [`store`] — the last-write-wins status store
//!
//! Everything else is plumbing: [`event`] models the stdin payload,
//! [`config`] captures environment once at startup, [`process`] runs child
//! processes with a deadline, and [`git`]/[`tracker`] wrap the external CLIs.

pub mod config;
pub mod event;
pub mod git;
pub mod home;
pub mod logging;
pub mod meta;
pub mod process;
pub mod status;
pub mod store;
pub mod tracker;
pub mod workspace;

pub use config::Config;
pub use event::{EventKind, HookPayload};
pub use status::Status;
pub use store::{StatusRecord, StatusStore};
pub use workspace::ScanOrder;
