//! Lifecycle event payloads read from hook stdin.
//!
//! Each hook invocation receives a single JSON object on stdin describing
//! one assistant lifecycle event. The payload is ephemeral — it is parsed,
//! classified, and dropped; nothing here is persisted as-is.

use serde::Deserialize;
use serde_json::Value;

/// The raw hook payload as delivered on stdin.
///
/// Every field is optional: hooks must tolerate absent, empty, or malformed
/// input, so the natural representation of "no input" is
/// `HookPayload::default()`. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookPayload {
    /// Event name, e.g. `"PreToolUse"`. Maps to [`EventKind`] via
    /// [`EventKind::parse`].
    pub hook_event_name: Option<String>,
    /// Tool name for tool-related events (`PreToolUse`, `PostToolUse`,
    /// `PermissionRequest`).
    pub tool_name: Option<String>,
    /// Notification subtype for `Notification` events.
    pub notification_type: Option<String>,
    /// Session token of the assistant session that fired the event.
    pub session_id: Option<String>,
    /// Working directory reported by the assistant.
    pub cwd: Option<String>,
    /// Tool input for `PostToolUse` events, kept opaque until a hook needs
    /// a specific field (e.g. `plan` for `ExitPlanMode`).
    #[serde(default)]
    pub tool_input: Option<Value>,
}

impl HookPayload {
    /// Parse a payload from raw stdin bytes.
    ///
    /// Malformed or empty input yields the default (all-`None`) payload
    /// rather than an error — a hook must never fail because the assistant
    /// sent it something unexpected.
    pub fn from_stdin_bytes(input: &[u8]) -> Self {
        serde_json::from_slice(input).unwrap_or_default()
    }

    /// The classified event kind, or `None` when the event name is absent
    /// or unrecognized (both of which the dispatcher treats as ignore).
    pub fn kind(&self) -> Option<EventKind> {
        self.hook_event_name.as_deref().and_then(EventKind::parse)
    }
}

/// The lifecycle event kinds the relay understands.
///
/// Anything not listed here does not parse and is classified as ignore by
/// the dispatcher — forward compatibility with new hook events is "do
/// nothing", never "fail".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    UserPromptSubmit,
    PreToolUse,
    PostToolUse,
    PermissionRequest,
    Stop,
    SubagentStop,
    SessionStart,
    SessionEnd,
    PreCompact,
    Notification,
}

impl EventKind {
    /// Parse an event name as delivered in `hook_event_name`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "UserPromptSubmit" => Some(Self::UserPromptSubmit),
            "PreToolUse" => Some(Self::PreToolUse),
            "PostToolUse" => Some(Self::PostToolUse),
            "PermissionRequest" => Some(Self::PermissionRequest),
            "Stop" => Some(Self::Stop),
            "SubagentStop" => Some(Self::SubagentStop),
            "SessionStart" => Some(Self::SessionStart),
            "SessionEnd" => Some(Self::SessionEnd),
            "PreCompact" => Some(Self::PreCompact),
            "Notification" => Some(Self::Notification),
            _ => None,
        }
    }
}
