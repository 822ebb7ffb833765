//! File logging for the hook binary.
//!
//! Stdout and the exit status belong to the Claude Code hook contract, so
//! logs go to a daily-rolled file under `~/.agentcraft/logs` instead. Set
//! `AGENTCRAFT_DEBUG_LOG=1` for debug-level output.

use std::env;

use agentcraft_core::StorageConfig;
use fs_err as fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initializes file logging. Returns `None` (and stays silent) when the log
/// directory cannot be set up; the hook still works without logs.
pub fn init() -> Option<WorkerGuard> {
    let storage = StorageConfig::from_home().ok()?;
    fs::create_dir_all(storage.logs_dir()).ok()?;

    let appender = tracing_appender::rolling::daily(storage.logs_dir(), "agentcraft-hook.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let debug_enabled = env::var("AGENTCRAFT_DEBUG_LOG")
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false);
    let filter = if debug_enabled {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}
