//! Event resolution engine.
//!
//! Given a loaded assignment document, a canonical event key, and whatever
//! identity the host integration extracted from its native payload, decides
//! which sound reference (if any) should play.
//!
//! Precedence is three-tier, first non-empty slot wins:
//!
//! ```text
//! settings.enabled == false  → no sound, unconditionally
//! 1. skills[skill].hooks[event]    (skipped if skill disabled or absent)
//! 2. agents[agent].hooks[event]    (skipped if agent disabled or absent)
//! 3. global[event]
//! ```
//!
//! A disabled or empty tier falls through to the next one; "play nothing at
//! this tier" is not a stopping state. The engine is host-agnostic: callers
//! (host integrations) consult [`crate::hosts`] and never ask for events
//! their host cannot observe, and only hosts whose profile declares
//! `supports_agent_overrides` should populate the agent hint.
//!
//! Returning `None` is the normal "no sound assigned" outcome, never an
//! error. The chosen reference is not filesystem-validated here.

use crate::types::{AssignmentDocument, EventKey};

/// Identity extracted from a host's native event payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeHint {
    pub agent: Option<String>,
    pub skill: Option<String>,
}

impl ScopeHint {
    pub fn agent(name: impl Into<String>) -> Self {
        Self {
            agent: Some(name.into()),
            skill: None,
        }
    }

    pub fn skill(name: impl Into<String>) -> Self {
        Self {
            agent: None,
            skill: Some(name.into()),
        }
    }
}

/// The outcome of a successful resolution: what to play and how loud.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Sound reference for the pack path resolver.
    pub reference: String,
    /// Always `settings.masterVolume`, whichever tier matched.
    pub volume: f64,
}

/// Resolves one event against the document. `None` means play nothing.
pub fn resolve_event(
    doc: &AssignmentDocument,
    event: EventKey,
    hint: &ScopeHint,
) -> Option<Resolution> {
    // Master kill switch dominates every tier.
    if !doc.settings.enabled {
        tracing::debug!(event = %event, "Sounds disabled; skipping resolution");
        return None;
    }
    let volume = doc.settings.effective_volume();

    if let Some(skill) = &hint.skill {
        if let Some(config) = doc.skills.get(skill) {
            if config.enabled {
                if let Some(reference) = config.hooks.get(&event).and_then(|slot| slot.pick_one())
                {
                    tracing::debug!(event = %event, skill = %skill, reference = %reference, "Resolved at skill tier");
                    return Some(Resolution { reference, volume });
                }
            }
        }
    }

    if let Some(agent) = &hint.agent {
        if let Some(config) = doc.agents.get(agent) {
            if config.enabled {
                if let Some(reference) = config.hooks.get(&event).and_then(|slot| slot.pick_one())
                {
                    tracing::debug!(event = %event, agent = %agent, reference = %reference, "Resolved at agent tier");
                    return Some(Resolution { reference, volume });
                }
            }
        }
    }

    let reference = doc.global.get(&event).and_then(|slot| slot.pick_one())?;
    tracing::debug!(event = %event, reference = %reference, "Resolved at global tier");
    Some(Resolution { reference, volume })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::SoundSlot;
    use crate::types::{Scope, ScopeConfig};
    use serde_json::json;

    fn doc_from(value: serde_json::Value) -> AssignmentDocument {
        AssignmentDocument::from_value(&value)
    }

    #[test]
    fn test_empty_document_resolves_to_none() {
        let doc = AssignmentDocument::default();
        for event in crate::types::ALL_EVENTS {
            assert_eq!(resolve_event(&doc, event, &ScopeHint::default()), None);
        }
    }

    #[test]
    fn test_kill_switch_dominates_all_tiers() {
        let doc = doc_from(json!({
            "global": { "Stop": "g.mp3" },
            "agents": { "a": { "enabled": true, "hooks": { "Stop": "a.mp3" } } },
            "skills": { "s": { "enabled": true, "hooks": { "Stop": "s.mp3" } } },
            "settings": { "enabled": false }
        }));
        let hint = ScopeHint {
            agent: Some("a".to_string()),
            skill: Some("s".to_string()),
        };
        assert_eq!(resolve_event(&doc, EventKey::Stop, &hint), None);
    }

    #[test]
    fn test_skill_tier_wins_over_agent_and_global() {
        let doc = doc_from(json!({
            "global": { "PreToolUse": "g.mp3" },
            "agents": { "a": { "enabled": true, "hooks": { "PreToolUse": "a.mp3" } } },
            "skills": { "s": { "enabled": true, "hooks": { "PreToolUse": "s.mp3" } } }
        }));
        let hint = ScopeHint {
            agent: Some("a".to_string()),
            skill: Some("s".to_string()),
        };
        let resolved = resolve_event(&doc, EventKey::PreToolUse, &hint).unwrap();
        assert_eq!(resolved.reference, "s.mp3");
    }

    #[test]
    fn test_disabled_skill_falls_through_to_global() {
        let doc = doc_from(json!({
            "global": { "PreToolUse": "b" },
            "skills": { "x": { "enabled": false, "hooks": { "PreToolUse": "a" } } }
        }));
        let resolved = resolve_event(&doc, EventKey::PreToolUse, &ScopeHint::skill("x")).unwrap();
        assert_eq!(resolved.reference, "b");
    }

    #[test]
    fn test_disabled_agent_falls_through_to_global() {
        let doc = doc_from(json!({
            "global": { "Stop": "g.mp3" },
            "agents": { "a": { "enabled": false, "hooks": { "Stop": "a.mp3" } } }
        }));
        let resolved = resolve_event(&doc, EventKey::Stop, &ScopeHint::agent("a")).unwrap();
        assert_eq!(resolved.reference, "g.mp3");
    }

    #[test]
    fn test_empty_slot_falls_through() {
        // An array of falsy values normalizes to absence, so the skill tier
        // must not swallow the event.
        let mut doc = doc_from(json!({
            "global": { "PreToolUse": "g.mp3" }
        }));
        let mut config = ScopeConfig::default();
        config
            .hooks
            .insert(EventKey::PreToolUse, SoundSlot::Many(vec!["".to_string()]));
        doc.skills.insert("s".to_string(), config);

        let resolved = resolve_event(&doc, EventKey::PreToolUse, &ScopeHint::skill("s")).unwrap();
        assert_eq!(resolved.reference, "g.mp3");
    }

    #[test]
    fn test_unknown_skill_falls_through() {
        let doc = doc_from(json!({ "global": { "PreToolUse": "g.mp3" } }));
        let resolved =
            resolve_event(&doc, EventKey::PreToolUse, &ScopeHint::skill("nope")).unwrap();
        assert_eq!(resolved.reference, "g.mp3");
    }

    #[test]
    fn test_agent_tier_used_without_skill_match() {
        let doc = doc_from(json!({
            "global": { "Stop": "g.mp3" },
            "agents": { "reviewer": { "enabled": true, "hooks": { "Stop": "a.mp3" } } }
        }));
        let hint = ScopeHint {
            agent: Some("reviewer".to_string()),
            skill: Some("unrelated".to_string()),
        };
        let resolved = resolve_event(&doc, EventKey::Stop, &hint).unwrap();
        assert_eq!(resolved.reference, "a.mp3");
    }

    #[test]
    fn test_volume_is_master_volume_regardless_of_tier() {
        let doc = doc_from(json!({
            "global": { "Stop": "g.mp3" },
            "skills": { "s": { "enabled": true, "hooks": { "PreToolUse": "s.mp3" } } },
            "settings": { "masterVolume": 0.7 }
        }));
        let global = resolve_event(&doc, EventKey::Stop, &ScopeHint::default()).unwrap();
        let skill = resolve_event(&doc, EventKey::PreToolUse, &ScopeHint::skill("s")).unwrap();
        assert_eq!(global.volume, 0.7);
        assert_eq!(skill.volume, 0.7);
    }

    #[test]
    fn test_missing_master_volume_uses_fallback() {
        let doc = doc_from(json!({ "global": { "Stop": "g.mp3" } }));
        let resolved = resolve_event(&doc, EventKey::Stop, &ScopeHint::default()).unwrap();
        assert_eq!(resolved.volume, crate::types::FALLBACK_MASTER_VOLUME);
    }

    #[test]
    fn test_multi_value_global_slot_stays_within_set() {
        let mut doc = AssignmentDocument::default();
        for reference in ["a", "b", "c"] {
            doc.assign(&Scope::Global, EventKey::Stop, reference);
        }
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..300 {
            let resolved = resolve_event(&doc, EventKey::Stop, &ScopeHint::default()).unwrap();
            assert!(["a", "b", "c"].contains(&resolved.reference.as_str()));
            seen.insert(resolved.reference);
        }
        assert_eq!(seen.len(), 3);
    }
}
