//! Claude Code hook payload parsing and canonicalization.
//!
//! Claude Code invokes the hook binary with a JSON event on stdin. This
//! module turns that native payload into the canonical event key plus the
//! identity the resolution engine cares about: which agent, which skill,
//! and the dedup key narrowing the event by tool/skill name.

use agentcraft_core::engine::ScopeHint;
use agentcraft_core::types::{EventKey, SKILL_EVENTS};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

/// Tool name Claude Code uses for skill invocations.
const SKILL_TOOL_NAME: &str = "Skill";

/// Tool name for subagent dispatch; its input carries the agent identity.
const TASK_TOOL_NAME: &str = "Task";

// Custom tools that wrap skills don't use the built-in Skill tool name.
// Consulted only after the exact match fails; the exact branch always wins.
static SKILL_TOOL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("(?i)skill").expect("static regex"));

/// Raw hook event as Claude Code delivers it on stdin.
///
/// Every field is optional: payload shapes vary per hook event and across
/// Claude Code versions, and an unexpected shape must degrade to "no sound",
/// not an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub hook_event_name: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub tool_input: Option<Value>,
    #[serde(default)]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub notification_type: Option<String>,
    #[serde(default)]
    pub trigger: Option<String>,
    #[serde(default)]
    pub stop_hook_active: Option<bool>,
}

/// A native payload mapped onto the engine's vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalEvent {
    pub event: EventKey,
    pub hint: ScopeHint,
    /// Event key, narrowed by skill or tool name where one exists, so
    /// distinct tools never suppress each other.
    pub dedup_key: String,
}

impl HookInput {
    /// Maps the payload to a canonical event, or `None` when nothing should
    /// play: unknown event names, and `Stop` events re-fired by a running
    /// stop hook (`stop_hook_active`), which would loop otherwise.
    pub fn to_event(&self) -> Option<CanonicalEvent> {
        let name = self.hook_event_name.as_deref()?;
        let event = match name.parse::<EventKey>() {
            Ok(event) => event,
            Err(()) => {
                tracing::debug!(event_name = %name, "Unhandled hook event");
                return None;
            }
        };

        if event == EventKey::Stop && self.stop_hook_active == Some(true) {
            tracing::debug!("Skipping Stop re-fired by an active stop hook");
            return None;
        }

        let hint = ScopeHint {
            agent: self.agent_identity(),
            skill: if SKILL_EVENTS.contains(&event) {
                self.skill_identity()
            } else {
                None
            },
        };

        let narrow = hint.skill.as_deref().or(self.tool_name.as_deref());
        let dedup_key = match narrow {
            Some(name) => format!("{}:{}", event, name),
            None => event.to_string(),
        };

        Some(CanonicalEvent {
            event,
            hint,
            dedup_key,
        })
    }

    /// Agent identity, when the payload carries one: an explicit
    /// `agent_name`, or the `subagent_type` of a Task tool dispatch.
    fn agent_identity(&self) -> Option<String> {
        if let Some(name) = self.agent_name.as_deref() {
            if !name.is_empty() {
                return Some(name.to_string());
            }
        }
        if self.tool_name.as_deref() == Some(TASK_TOOL_NAME) {
            if let Some(name) = self.tool_field("subagent_type") {
                return Some(name);
            }
        }
        None
    }

    /// Skill identity for tool events.
    ///
    /// Exact precedence: a `Skill` tool call names the skill in its input
    /// (`skill`, or `name` in older payloads). Only when the tool is not
    /// `Skill` is the substring pattern consulted, and then the tool's own
    /// name is the skill key.
    fn skill_identity(&self) -> Option<String> {
        let tool = self.tool_name.as_deref()?;
        if tool == SKILL_TOOL_NAME {
            return self
                .tool_field("skill")
                .or_else(|| self.tool_field("name"));
        }
        if SKILL_TOOL_PATTERN.is_match(tool) {
            return Some(tool.to_string());
        }
        None
    }

    fn tool_field(&self, field: &str) -> Option<String> {
        let value = self.tool_input.as_ref()?.get(field)?.as_str()?;
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}
