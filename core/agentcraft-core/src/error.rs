//! Error types for agentcraft-core operations.
//!
//! The event-handling path is deliberately error-free (every failure there
//! degrades to "play nothing"); these errors exist only for the operations
//! a caller genuinely needs to branch on, like saving the document.

use std::path::PathBuf;

/// All errors that can occur in agentcraft-core operations.
#[derive(Debug, thiserror::Error)]
pub enum AgentcraftError {
    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("Configuration serialize failed: {path}: {source}")]
    ConfigSerializeFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration write failed: {path}: {source}")]
    ConfigWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using AgentcraftError.
pub type Result<T> = std::result::Result<T, AgentcraftError>;
