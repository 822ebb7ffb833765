//! Assignment document data model.
//!
//! These types mirror the persisted `assignments.json` shape shared by every
//! host integration and the dashboard. The document is duck-typed on disk
//! (hand-edited files, older revisions); all "might be missing" handling is
//! pushed into [`AssignmentDocument::from_value`] so the rest of the crate
//! can assume a fully-populated shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::slot::SoundSlot;

/// Master volume applied by host integrations when the field is missing.
/// The dashboard writes 1.0 into fresh documents; plugins fall back to 0.5.
pub const FALLBACK_MASTER_VOLUME: f64 = 0.5;

/// Canonical lifecycle events a sound can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventKey {
    SessionStart,
    SessionEnd,
    Stop,
    SubagentStop,
    PreToolUse,
    PostToolUse,
    PostToolUseFailure,
    Notification,
    PreCompact,
}

/// All lifecycle events, in display order.
pub const ALL_EVENTS: [EventKey; 9] = [
    EventKey::SessionStart,
    EventKey::SessionEnd,
    EventKey::Stop,
    EventKey::SubagentStop,
    EventKey::PreToolUse,
    EventKey::PostToolUse,
    EventKey::PostToolUseFailure,
    EventKey::Notification,
    EventKey::PreCompact,
];

/// The subset of events that exists at skill scope.
pub const SKILL_EVENTS: [EventKey; 2] = [EventKey::PreToolUse, EventKey::PostToolUse];

impl EventKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKey::SessionStart => "SessionStart",
            EventKey::SessionEnd => "SessionEnd",
            EventKey::Stop => "Stop",
            EventKey::SubagentStop => "SubagentStop",
            EventKey::PreToolUse => "PreToolUse",
            EventKey::PostToolUse => "PostToolUse",
            EventKey::PostToolUseFailure => "PostToolUseFailure",
            EventKey::Notification => "Notification",
            EventKey::PreCompact => "PreCompact",
        }
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_EVENTS
            .iter()
            .find(|key| key.as_str() == s)
            .copied()
            .ok_or(())
    }
}

/// An assignment level: the whole document, one agent, or one skill.
///
/// Parsed once at the boundary from the `agent:<name>` / `skill:<qualified>`
/// identifiers the dashboard uses, never re-split downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Global,
    Agent(String),
    Skill(String),
}

impl Scope {
    /// Parses a scope identifier. `global` and the prefixed forms are
    /// accepted; anything else is `None`.
    pub fn parse(raw: &str) -> Option<Scope> {
        if raw == "global" {
            return Some(Scope::Global);
        }
        if let Some(name) = raw.strip_prefix("agent:") {
            if !name.is_empty() {
                return Some(Scope::Agent(name.to_string()));
            }
        }
        if let Some(name) = raw.strip_prefix("skill:") {
            if !name.is_empty() {
                return Some(Scope::Skill(name.to_string()));
            }
        }
        None
    }
}

/// Per-agent or per-skill assignment set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub hooks: BTreeMap<EventKey, SoundSlot>,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            hooks: BTreeMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// `settings` section: master volume, kill switch, and dashboard themes.
///
/// `uiSounds` (theme → interaction-slot map) belongs to the dashboard; it is
/// carried verbatim so saves round-trip losslessly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_volume: Option<f64>,
    pub enabled: bool,
    pub theme: String,
    pub ui_theme: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ui_sounds: BTreeMap<String, BTreeMap<String, SoundSlot>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: Some(1.0),
            enabled: true,
            theme: "terran".to_string(),
            ui_theme: "sc2".to_string(),
            ui_sounds: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// The volume host integrations should pass to playback.
    pub fn effective_volume(&self) -> f64 {
        self.master_volume
            .unwrap_or(FALLBACK_MASTER_VOLUME)
            .clamp(0.0, 1.0)
    }
}

/// The persisted root: global sounds, per-agent and per-skill sound sets,
/// and settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssignmentDocument {
    #[serde(default)]
    pub global: BTreeMap<EventKey, SoundSlot>,
    #[serde(default)]
    pub agents: BTreeMap<String, ScopeConfig>,
    #[serde(default)]
    pub skills: BTreeMap<String, ScopeConfig>,
    #[serde(default)]
    pub settings: Settings,
}

impl AssignmentDocument {
    /// Repairs an untrusted JSON document field by field.
    ///
    /// Missing or wrong-typed sections default to empty; unknown event-key
    /// strings and empty slots are dropped. This is the single seam through
    /// which every loaded document passes.
    pub fn from_value(value: &Value) -> Self {
        let obj = match value.as_object() {
            Some(obj) => obj,
            None => return Self::default(),
        };

        Self {
            global: hooks_from_value(obj.get("global")),
            agents: scopes_from_value(obj.get("agents")),
            skills: scopes_from_value(obj.get("skills")),
            settings: settings_from_value(obj.get("settings")),
        }
    }

    fn hooks_for_scope(&mut self, scope: &Scope) -> &mut BTreeMap<EventKey, SoundSlot> {
        match scope {
            Scope::Global => &mut self.global,
            Scope::Agent(name) => &mut self.agents.entry(name.clone()).or_default().hooks,
            Scope::Skill(name) => &mut self.skills.entry(name.clone()).or_default().hooks,
        }
    }

    /// Adds a sound reference to a slot, creating the scope entry if needed.
    pub fn assign(&mut self, scope: &Scope, event: EventKey, reference: &str) {
        let hooks = self.hooks_for_scope(scope);
        let slot = hooks.remove(&event).unwrap_or_default().append(reference);
        if !slot.is_empty() {
            hooks.insert(event, slot);
        }
    }

    /// Removes a sound reference from a slot; drops the slot when it empties.
    pub fn unassign(&mut self, scope: &Scope, event: EventKey, reference: &str) {
        let hooks = self.hooks_for_scope(scope);
        let slot = hooks.remove(&event).unwrap_or_default().remove(reference);
        if !slot.is_empty() {
            hooks.insert(event, slot);
        }
    }
}

fn hooks_from_value(value: Option<&Value>) -> BTreeMap<EventKey, SoundSlot> {
    let mut hooks = BTreeMap::new();
    let obj = match value.and_then(Value::as_object) {
        Some(obj) => obj,
        None => return hooks,
    };
    for (key, raw_slot) in obj {
        let event = match key.parse::<EventKey>() {
            Ok(event) => event,
            Err(()) => {
                tracing::debug!(key = %key, "Dropping unknown event key");
                continue;
            }
        };
        let slot = SoundSlot::from_value(raw_slot);
        if !slot.is_empty() {
            hooks.insert(event, slot);
        }
    }
    hooks
}

fn scopes_from_value(value: Option<&Value>) -> BTreeMap<String, ScopeConfig> {
    let mut scopes = BTreeMap::new();
    let obj = match value.and_then(Value::as_object) {
        Some(obj) => obj,
        None => return scopes,
    };
    for (name, raw) in obj {
        let raw_obj = match raw.as_object() {
            Some(raw_obj) => raw_obj,
            None => continue,
        };
        scopes.insert(
            name.clone(),
            ScopeConfig {
                enabled: raw_obj
                    .get("enabled")
                    .and_then(Value::as_bool)
                    .unwrap_or(true),
                hooks: hooks_from_value(raw_obj.get("hooks")),
            },
        );
    }
    scopes
}

fn settings_from_value(value: Option<&Value>) -> Settings {
    let obj = match value.and_then(Value::as_object) {
        Some(obj) => obj,
        None => {
            // Missing settings section: the kill switch defaults on, but a
            // missing masterVolume keeps the consumer-side fallback.
            return Settings {
                master_volume: None,
                ..Settings::default()
            };
        }
    };

    let mut ui_sounds = BTreeMap::new();
    if let Some(themes) = obj.get("uiSounds").and_then(Value::as_object) {
        for (theme, slots) in themes {
            let Some(slots) = slots.as_object() else {
                continue;
            };
            let mut theme_slots = BTreeMap::new();
            for (interaction, raw_slot) in slots {
                let slot = SoundSlot::from_value(raw_slot);
                if !slot.is_empty() {
                    theme_slots.insert(interaction.clone(), slot);
                }
            }
            ui_sounds.insert(theme.clone(), theme_slots);
        }
    }

    Settings {
        master_volume: obj.get("masterVolume").and_then(Value::as_f64),
        enabled: obj.get("enabled").and_then(Value::as_bool).unwrap_or(true),
        theme: obj
            .get("theme")
            .and_then(Value::as_str)
            .unwrap_or("terran")
            .to_string(),
        ui_theme: obj
            .get("uiTheme")
            .and_then(Value::as_str)
            .unwrap_or("sc2")
            .to_string(),
        ui_sounds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_key_round_trips_as_string() {
        for event in ALL_EVENTS {
            assert_eq!(event.as_str().parse::<EventKey>(), Ok(event));
        }
        assert!("NotAnEvent".parse::<EventKey>().is_err());
    }

    #[test]
    fn test_scope_parse() {
        assert_eq!(Scope::parse("global"), Some(Scope::Global));
        assert_eq!(
            Scope::parse("agent:reviewer"),
            Some(Scope::Agent("reviewer".to_string()))
        );
        assert_eq!(
            Scope::parse("skill:plugin-dev:hook-development"),
            Some(Scope::Skill("plugin-dev:hook-development".to_string()))
        );
        assert_eq!(Scope::parse("agent:"), None);
        assert_eq!(Scope::parse("bogus"), None);
    }

    #[test]
    fn test_from_value_non_object_is_default() {
        let doc = AssignmentDocument::from_value(&json!("nope"));
        assert_eq!(doc, AssignmentDocument::default());
        assert!(doc.settings.enabled);
        assert!(doc.global.is_empty());
    }

    #[test]
    fn test_from_value_repairs_sections_independently() {
        let doc = AssignmentDocument::from_value(&json!({
            "global": {
                "Stop": "sounds/stop.mp3",
                "BogusEvent": "x.mp3",
                "PreToolUse": 42
            },
            "agents": {
                "reviewer": { "enabled": false, "hooks": { "Stop": ["a.mp3", "b.mp3"] } },
                "broken": "not-an-object"
            },
            "skills": 7,
            "settings": { "masterVolume": 0.8, "enabled": false }
        }));

        assert_eq!(doc.global.len(), 1);
        assert_eq!(
            doc.global.get(&EventKey::Stop),
            Some(&SoundSlot::Single("sounds/stop.mp3".to_string()))
        );
        assert_eq!(doc.agents.len(), 1);
        assert!(!doc.agents["reviewer"].enabled);
        assert!(doc.skills.is_empty());
        assert_eq!(doc.settings.master_volume, Some(0.8));
        assert!(!doc.settings.enabled);
    }

    #[test]
    fn test_missing_settings_defaults() {
        let doc = AssignmentDocument::from_value(&json!({ "global": {} }));
        assert!(doc.settings.enabled);
        assert_eq!(doc.settings.master_volume, None);
        assert_eq!(doc.settings.effective_volume(), FALLBACK_MASTER_VOLUME);
        assert_eq!(doc.settings.theme, "terran");
        assert_eq!(doc.settings.ui_theme, "sc2");
    }

    #[test]
    fn test_default_document_matches_dashboard_defaults() {
        let doc = AssignmentDocument::default();
        assert_eq!(doc.settings.master_volume, Some(1.0));
        assert!(doc.settings.enabled);
        assert!(doc.global.is_empty());
        assert!(doc.agents.is_empty());
        assert!(doc.skills.is_empty());
    }

    #[test]
    fn test_effective_volume_clamps() {
        let mut settings = Settings::default();
        settings.master_volume = Some(3.0);
        assert_eq!(settings.effective_volume(), 1.0);
        settings.master_volume = Some(-1.0);
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_assign_and_unassign_round_trip() {
        let mut doc = AssignmentDocument::default();
        let scope = Scope::Agent("reviewer".to_string());

        doc.assign(&scope, EventKey::Stop, "a.mp3");
        doc.assign(&scope, EventKey::Stop, "b.mp3");
        assert_eq!(
            doc.agents["reviewer"].hooks[&EventKey::Stop],
            SoundSlot::Many(vec!["a.mp3".to_string(), "b.mp3".to_string()])
        );

        doc.unassign(&scope, EventKey::Stop, "a.mp3");
        assert_eq!(
            doc.agents["reviewer"].hooks[&EventKey::Stop],
            SoundSlot::Single("b.mp3".to_string())
        );

        // Slot disappears entirely once the last reference goes.
        doc.unassign(&scope, EventKey::Stop, "b.mp3");
        assert!(!doc.agents["reviewer"].hooks.contains_key(&EventKey::Stop));
    }

    #[test]
    fn test_document_serde_round_trip() {
        let mut doc = AssignmentDocument::default();
        doc.assign(&Scope::Global, EventKey::Stop, "sounds/stop.mp3");
        doc.assign(
            &Scope::Skill("ask-gemini".to_string()),
            EventKey::PreToolUse,
            "pub/pack:skills/start.mp3",
        );

        let json = serde_json::to_string_pretty(&doc).unwrap();
        let reloaded = AssignmentDocument::from_value(&serde_json::from_str(&json).unwrap());
        assert_eq!(reloaded, doc);
    }
}
