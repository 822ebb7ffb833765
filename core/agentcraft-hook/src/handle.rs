//! Event handler for Claude Code hooks.
//!
//! Reads the hook JSON from stdin, canonicalizes it, and runs the resolution
//! pipeline:
//!
//! ```text
//! HookInput → CanonicalEvent → DedupGuard → AssignmentStore::load
//!   → resolve_event → resolve_pack_path → playback
//! ```
//!
//! Everything past parsing is total: no sound assigned, a suppressed
//! duplicate, or an unresolvable reference all end the run silently.

use std::io::{self, Read};
use std::path::PathBuf;

use agentcraft_core::{resolve_event, resolve_pack_path, AssignmentStore, DedupGuard, StorageConfig};

use crate::event::HookInput;
use crate::playback;

pub fn run() -> Result<(), String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| format!("Failed to read stdin: {}", e))?;

    if input.trim().is_empty() {
        return Ok(());
    }

    let hook_input: HookInput =
        serde_json::from_str(&input).map_err(|e| format!("Failed to parse hook input: {}", e))?;

    let storage = StorageConfig::from_home().map_err(|e| e.to_string())?;
    // The hook binary lives for one event, so this guard mostly matters for
    // payloads that map to the same dedup key twice within a run; a
    // long-lived host adapter holds one guard for its whole process.
    let mut guard = DedupGuard::new();

    if let Some((path, volume)) = resolve_playback(&hook_input, &storage, &mut guard) {
        playback::play(&path, volume);
    }
    Ok(())
}

/// Runs the pipeline up to (but not including) playback dispatch.
///
/// Returns the absolute sound path and volume to play, or `None` when the
/// event should stay silent for any reason.
pub(crate) fn resolve_playback(
    input: &HookInput,
    storage: &StorageConfig,
    guard: &mut DedupGuard,
) -> Option<(PathBuf, f64)> {
    let canonical = input.to_event()?;

    if guard.should_suppress_now(&canonical.dedup_key) {
        tracing::debug!(key = %canonical.dedup_key, "Suppressed duplicate event");
        return None;
    }

    let doc = AssignmentStore::from_storage(storage).load();
    let resolution = resolve_event(&doc, canonical.event, &canonical.hint)?;

    let path = match resolve_pack_path(&storage.packs_dir(), &resolution.reference) {
        Some(path) => path,
        None => {
            tracing::warn!(reference = %resolution.reference, "Unresolvable sound reference");
            return None;
        }
    };

    tracing::debug!(
        event = %canonical.event,
        session = input.session_id.as_deref().unwrap_or("-"),
        reference = %resolution.reference,
        path = %path.display(),
        "Resolved sound"
    );
    Some((path, resolution.volume))
}
