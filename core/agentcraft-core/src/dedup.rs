//! Time-windowed event deduplication.
//!
//! Hosts can emit the same logical event in rapid bursts (a resumed session
//! firing two start events, a tool loop re-entering). The guard suppresses a
//! key that already fired within the window. State is in-memory only and
//! per-instance; each host-integration process owns its own guard, and a
//! restart clears all suppression history.

use chrono::Utc;
use std::collections::HashMap;

/// Suppression window in milliseconds.
pub const DEDUP_WINDOW_MS: i64 = 3000;

/// Tracks, per dedup key, the last time the caller attempted to fire.
///
/// The guard only knows about attempts: the timestamp is recorded on allow
/// whether or not a sound actually plays afterwards.
#[derive(Debug)]
pub struct DedupGuard {
    window_ms: i64,
    last_fired: HashMap<String, i64>,
}

impl DedupGuard {
    pub fn new() -> Self {
        Self::with_window(DEDUP_WINDOW_MS)
    }

    pub fn with_window(window_ms: i64) -> Self {
        Self {
            window_ms,
            last_fired: HashMap::new(),
        }
    }

    /// Returns true if `key` fired within the window before `now_ms`.
    ///
    /// On suppress the recorded timestamp is left untouched; on allow it is
    /// updated to `now_ms`. Distinct keys are fully independent.
    pub fn should_suppress(&mut self, key: &str, now_ms: i64) -> bool {
        if let Some(&last) = self.last_fired.get(key) {
            if now_ms - last < self.window_ms {
                return true;
            }
        }
        self.last_fired.insert(key.to_string(), now_ms);
        false
    }

    /// [`should_suppress`](Self::should_suppress) against the wall clock.
    pub fn should_suppress_now(&mut self, key: &str) -> bool {
        self.should_suppress(key, Utc::now().timestamp_millis())
    }
}

impl Default for DedupGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_fire_is_allowed() {
        let mut guard = DedupGuard::new();
        assert!(!guard.should_suppress("Stop", 1_000));
    }

    #[test]
    fn test_refire_within_window_is_suppressed() {
        let mut guard = DedupGuard::new();
        assert!(!guard.should_suppress("Stop", 1_000));
        assert!(guard.should_suppress("Stop", 2_000));
    }

    #[test]
    fn test_refire_after_window_is_allowed() {
        let mut guard = DedupGuard::new();
        assert!(!guard.should_suppress("Stop", 1_000));
        assert!(!guard.should_suppress("Stop", 4_500));
    }

    #[test]
    fn test_suppress_does_not_extend_window() {
        let mut guard = DedupGuard::new();
        assert!(!guard.should_suppress("Stop", 1_000));
        // Suppressed attempts must not refresh the timestamp, so the key
        // frees up exactly one window after the first allowed fire.
        assert!(guard.should_suppress("Stop", 3_500));
        assert!(!guard.should_suppress("Stop", 4_100));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut guard = DedupGuard::new();
        assert!(!guard.should_suppress("Stop", 1_000));
        assert!(!guard.should_suppress("PreToolUse:some-skill", 1_001));
        assert!(guard.should_suppress("Stop", 1_002));
    }

    #[test]
    fn test_window_boundary_is_exclusive() {
        let mut guard = DedupGuard::new();
        assert!(!guard.should_suppress("Stop", 0));
        assert!(guard.should_suppress("Stop", DEDUP_WINDOW_MS - 1));
        let mut guard = DedupGuard::new();
        assert!(!guard.should_suppress("Stop", 0));
        assert!(!guard.should_suppress("Stop", DEDUP_WINDOW_MS));
    }

    #[test]
    fn test_custom_window() {
        let mut guard = DedupGuard::with_window(100);
        assert!(!guard.should_suppress("x", 0));
        assert!(guard.should_suppress("x", 99));
        assert!(!guard.should_suppress("x", 100));
    }
}
