//! Host capability table.
//!
//! Each supported coding-agent host observes a different subset of lifecycle
//! moments and names them differently. This static registry records, per
//! host: which events can fire, which skill-scope events exist, whether its
//! event payloads carry enough identity for per-agent overrides, and the
//! native event names the dashboard shows in its settings panel.
//!
//! The resolution engine is host-agnostic; only callers consult this table
//! (a host integration should never ask the engine to resolve an event its
//! profile cannot observe).

use once_cell::sync::Lazy;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::types::{EventKey, ALL_EVENTS, SKILL_EVENTS};

/// Identifier for a supported host integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HostId {
    ClaudeCode,
    OpenCode,
    Pi,
    /// Fallback for tools without host context; every event is assignable.
    Unknown,
}

impl HostId {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostId::ClaudeCode => "claude-code",
            HostId::OpenCode => "opencode",
            HostId::Pi => "pi",
            HostId::Unknown => "unknown",
        }
    }

    /// Parses a host identifier; anything unrecognized is `Unknown`.
    pub fn parse(raw: &str) -> HostId {
        match raw {
            "claude-code" => HostId::ClaudeCode,
            "opencode" => HostId::OpenCode,
            "pi" => HostId::Pi,
            _ => HostId::Unknown,
        }
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of what one host integration can observe.
#[derive(Debug, Clone)]
pub struct HostProfile {
    pub id: HostId,
    pub label: &'static str,
    /// Lifecycle events this host can fire at global/agent scope.
    pub events: BTreeSet<EventKey>,
    /// Events this host can fire at skill scope.
    pub skill_events: BTreeSet<EventKey>,
    /// Whether events carry agent identity (without it, only the global
    /// scope is meaningful even if the document has agent entries).
    pub supports_agent_overrides: bool,
    /// Native event name per canonical key, for display.
    pub native_names: BTreeMap<EventKey, &'static str>,
    /// Caveats for events that work differently on this host.
    pub notes: BTreeMap<EventKey, &'static str>,
}

impl HostProfile {
    pub fn supports_event(&self, event: EventKey) -> bool {
        self.events.contains(&event)
    }

    pub fn supports_skill_event(&self, event: EventKey) -> bool {
        self.skill_events.contains(&event)
    }

    pub fn native_name(&self, event: EventKey) -> Option<&'static str> {
        self.native_names.get(&event).copied()
    }

    pub fn note(&self, event: EventKey) -> Option<&'static str> {
        self.notes.get(&event).copied()
    }
}

static PROFILES: Lazy<BTreeMap<HostId, HostProfile>> = Lazy::new(|| {
    let mut profiles = BTreeMap::new();

    profiles.insert(
        HostId::ClaudeCode,
        HostProfile {
            id: HostId::ClaudeCode,
            label: "Claude Code",
            events: ALL_EVENTS.into_iter().collect(),
            skill_events: SKILL_EVENTS.into_iter().collect(),
            supports_agent_overrides: true,
            native_names: BTreeMap::from([
                (EventKey::SessionStart, "SessionStart hook"),
                (EventKey::SessionEnd, "SessionEnd hook"),
                (EventKey::Stop, "Stop hook"),
                (EventKey::SubagentStop, "SubagentStop hook"),
                (EventKey::PreToolUse, "PreToolUse hook"),
                (EventKey::PostToolUse, "PostToolUse hook"),
                (EventKey::PostToolUseFailure, "PostToolUseFailure hook"),
                (EventKey::Notification, "Notification hook"),
                (EventKey::PreCompact, "PreCompact hook"),
            ]),
            notes: BTreeMap::new(),
        },
    );

    profiles.insert(
        HostId::OpenCode,
        HostProfile {
            id: HostId::OpenCode,
            label: "OpenCode",
            events: BTreeSet::from([
                EventKey::SessionStart,
                EventKey::SessionEnd,
                EventKey::Stop,
                EventKey::PreToolUse,
                EventKey::PostToolUse,
                EventKey::PostToolUseFailure,
                EventKey::PreCompact,
            ]),
            skill_events: SKILL_EVENTS.into_iter().collect(),
            supports_agent_overrides: false,
            native_names: BTreeMap::from([
                (EventKey::SessionStart, "Plugin init"),
                (EventKey::SessionEnd, "session.deleted"),
                (EventKey::Stop, "session.idle"),
                (EventKey::PreToolUse, "tool.execute.before (skill)"),
                (EventKey::PostToolUse, "tool.execute.after (skill)"),
                (EventKey::PostToolUseFailure, "session.error"),
                (EventKey::PreCompact, "session.compacted"),
            ]),
            notes: BTreeMap::from([
                (
                    EventKey::SessionStart,
                    "Fires on both new and resumed sessions",
                ),
                (EventKey::Stop, "Fires when model finishes responding"),
                (EventKey::SubagentStop, "No equivalent in OpenCode"),
                (EventKey::Notification, "No equivalent in OpenCode"),
                (
                    EventKey::PreToolUse,
                    "Only fires for skill tool calls (tool=\"skill\")",
                ),
                (
                    EventKey::PostToolUse,
                    "Only fires for skill tool calls (tool=\"skill\")",
                ),
            ]),
        },
    );

    profiles.insert(
        HostId::Pi,
        HostProfile {
            id: HostId::Pi,
            label: "Pi",
            events: BTreeSet::from([
                EventKey::SessionStart,
                EventKey::SessionEnd,
                EventKey::Stop,
                EventKey::PreToolUse,
                EventKey::PostToolUse,
                EventKey::PostToolUseFailure,
                EventKey::PreCompact,
            ]),
            skill_events: SKILL_EVENTS.into_iter().collect(),
            supports_agent_overrides: false,
            native_names: BTreeMap::from([
                (EventKey::SessionStart, "session_start / session_switch"),
                (EventKey::SessionEnd, "session_shutdown"),
                (EventKey::Stop, "agent_end"),
                (EventKey::PreToolUse, "tool_call"),
                (EventKey::PostToolUse, "tool_execution_end"),
                (EventKey::PostToolUseFailure, "tool_execution_end (isError)"),
                (EventKey::PreCompact, "session_before_compact"),
            ]),
            notes: BTreeMap::from([
                (
                    EventKey::SessionStart,
                    "Fires on session load and /new or /resume",
                ),
                (
                    EventKey::Stop,
                    "Fires when agent finishes responding to a prompt",
                ),
                (
                    EventKey::SubagentStop,
                    "No equivalent in pi (build via extensions)",
                ),
                (EventKey::Notification, "No equivalent in pi"),
                (
                    EventKey::PreToolUse,
                    "Fires for all tool calls (read, bash, edit, write, custom)",
                ),
                (
                    EventKey::PostToolUse,
                    "Fires for all tool calls; skill lookup matches custom tool names",
                ),
            ]),
        },
    );

    profiles.insert(
        HostId::Unknown,
        HostProfile {
            id: HostId::Unknown,
            label: "All Hosts",
            events: ALL_EVENTS.into_iter().collect(),
            skill_events: SKILL_EVENTS.into_iter().collect(),
            supports_agent_overrides: true,
            native_names: BTreeMap::new(),
            notes: BTreeMap::new(),
        },
    );

    profiles
});

/// Returns the profile for a host identifier, falling back to the permissive
/// `unknown` profile. Never fails.
pub fn capabilities_for(host_id: &str) -> &'static HostProfile {
    &PROFILES[&HostId::parse(host_id)]
}

/// Set-membership check in the resolved profile.
pub fn is_supported(host_id: &str, event: EventKey, skill_scope: bool) -> bool {
    let profile = capabilities_for(host_id);
    if skill_scope {
        profile.supports_skill_event(event)
    } else {
        profile.supports_event(event)
    }
}

/// The concrete host integrations (excludes the `unknown` fallback).
pub fn all_host_ids() -> [HostId; 3] {
    [HostId::ClaudeCode, HostId::OpenCode, HostId::Pi]
}
