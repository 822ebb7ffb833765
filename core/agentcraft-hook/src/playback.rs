//! Fire-and-forget sound playback.
//!
//! Spawns the platform's audio player as a detached child so the hook can
//! exit immediately. Every failure here is swallowed: a missing file, a
//! missing player binary, or a spawn error must never surface to Claude
//! Code's event-handling path.

use std::path::Path;
use std::process::{Command, Stdio};

/// Plays an audio file at a volume in [0, 1]. Never blocks, never fails.
pub fn play(path: &Path, volume: f64) {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "Sound file missing; skipping playback");
        return;
    }

    #[cfg(target_os = "macos")]
    let result = Command::new("afplay")
        .arg("-v")
        .arg(volume.to_string())
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    #[cfg(target_os = "linux")]
    let result = if Path::new("/usr/bin/paplay").exists() {
        // PulseAudio volume is linear with 65536 = 100%.
        Command::new("paplay")
            .arg(format!("--volume={}", (volume * 65536.0).round() as u32))
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
    } else {
        Command::new("aplay")
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
    };

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    let result: std::io::Result<std::process::Child> = {
        let _ = volume;
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "no audio player configured for this platform",
        ))
    };

    match result {
        Ok(_child) => {
            // Deliberately not waited on; the player outlives the hook.
        }
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "Playback spawn failed");
        }
    }
}
