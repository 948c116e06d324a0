//! Event-to-status derivation.
//!
//! This is an event-classification table, not a strict automaton: the
//! assistant's real lifecycle is externally driven, so any status may
//! follow any other status. [`derive_status`] is a total, pure function —
//! every `(event kind, notification subtype)` pair maps to exactly one
//! outcome, where `None` means "ignore the event, write nothing".
//!
//! Design rule (load-bearing): the engine never branches on the tool name.
//! `PostToolUse` maps to `processing` and `PermissionRequest` maps to
//! `waiting_for_approval` for every tool, including user-interaction tools.
//! UI-level differentiation reads the record's `currentTool` field instead.
//! This is what lets new tool types work with zero changes here.

use crate::event::EventKind;

/// Canonical workspace status values.
///
/// Note the persisted `status` field is a plain string: the override path
/// on the hook binary accepts any string verbatim (callers report ad hoc
/// values like `error` that way), so the enum only covers the values
/// derivation itself produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Assistant is actively working on a prompt.
    Processing,
    /// A tool is currently executing.
    RunningTool,
    /// Turn finished, waiting for the user.
    WaitingForInput,
    /// A permission prompt is pending.
    WaitingForApproval,
    /// Context window is being compacted.
    Compacting,
    /// Session terminated.
    Ended,
}

impl Status {
    /// The wire form persisted in status records.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::RunningTool => "running_tool",
            Self::WaitingForInput => "waiting_for_input",
            Self::WaitingForApproval => "waiting_for_approval",
            Self::Compacting => "compacting",
            Self::Ended => "ended",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map one lifecycle event to a status, or `None` to skip the write.
///
/// `notification_type` is only consulted for [`EventKind::Notification`]:
/// `idle_prompt` means the assistant is waiting on the user, while
/// `permission_prompt` is skipped because the `PermissionRequest` event
/// already covers that transition. Every other subtype is skipped too.
pub fn derive_status(kind: EventKind, notification_type: Option<&str>) -> Option<Status> {
    match kind {
        EventKind::UserPromptSubmit => Some(Status::Processing),
        EventKind::PreToolUse => Some(Status::RunningTool),
        EventKind::PostToolUse => Some(Status::Processing),
        EventKind::PermissionRequest => Some(Status::WaitingForApproval),
        EventKind::Stop | EventKind::SubagentStop | EventKind::SessionStart => {
            Some(Status::WaitingForInput)
        }
        EventKind::SessionEnd => Some(Status::Ended),
        EventKind::PreCompact => Some(Status::Compacting),
        EventKind::Notification => match notification_type {
            Some("idle_prompt") => Some(Status::WaitingForInput),
            // permission_prompt is handled by PermissionRequest; everything
            // else is noise for status purposes.
            _ => None,
        },
    }
}
