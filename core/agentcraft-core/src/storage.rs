//! Storage path configuration.
//!
//! Centralizes every filesystem location AgentCraft touches. Production code
//! uses `StorageConfig::default()` (rooted at `~/.agentcraft`); tests inject
//! a temp directory via `StorageConfig::with_root()`.

use std::path::{Path, PathBuf};

use crate::error::{AgentcraftError, Result};

/// Central configuration for all AgentCraft storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Root directory for all AgentCraft data (default: ~/.agentcraft)
    root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::from_home().expect("Could not find home directory")
    }
}

impl StorageConfig {
    /// Non-panicking constructor for the default `~/.agentcraft` root.
    pub fn from_home() -> Result<Self> {
        let home = dirs::home_dir().ok_or(AgentcraftError::HomeDirNotFound)?;
        Ok(Self {
            root: home.join(".agentcraft"),
        })
    }

    /// Creates a StorageConfig with a custom root directory.
    /// Used for testing with temp directories.
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    /// Returns the root directory for AgentCraft data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to assignments.json (the persisted assignment document, shared
    /// by every host integration and the dashboard).
    pub fn assignments_file(&self) -> PathBuf {
        self.root.join("assignments.json")
    }

    /// Path to the packs/ directory (`<packsRoot>/<publisher>/<name>/...`).
    pub fn packs_dir(&self) -> PathBuf {
        self.root.join("packs")
    }

    /// Path to the logs/ directory (hook binary log files).
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Ensures the root directory and standard subdirectories exist.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(self.packs_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}
