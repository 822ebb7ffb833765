//! Assignment document persistence.
//!
//! One writer (the dashboard), many independent readers (host integrations
//! loading the file fresh at event-resolution time). Reads are total: any
//! read or parse failure yields the default document so a broken config can
//! never break a host's event handling.

use fs_err as fs;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::{AgentcraftError, Result};
use crate::storage::StorageConfig;
use crate::types::AssignmentDocument;

/// Handle on the persisted `assignments.json`.
#[derive(Debug, Clone)]
pub struct AssignmentStore {
    path: PathBuf,
}

impl AssignmentStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The store at the standard location inside a storage root.
    pub fn from_storage(storage: &StorageConfig) -> Self {
        Self::new(storage.assignments_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document, substituting defaults for anything unreadable.
    ///
    /// A missing file, invalid JSON, or a wrong-typed root all produce the
    /// default document; partially malformed documents are repaired
    /// field by field by [`AssignmentDocument::from_value`].
    pub fn load(&self) -> AssignmentDocument {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), error = %err, "Assignments unreadable; using defaults");
                return AssignmentDocument::default();
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => AssignmentDocument::from_value(&value),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Assignments malformed; using defaults");
                AssignmentDocument::default()
            }
        }
    }

    /// Persists the full document as pretty-printed JSON, creating missing
    /// parent directories.
    pub fn save(&self, doc: &AssignmentDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| AgentcraftError::Io {
                context: format!("creating {}", parent.display()),
                source,
            })?;
        }
        let content = serde_json::to_string_pretty(doc).map_err(|source| {
            AgentcraftError::ConfigSerializeFailed {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, content).map_err(|source| AgentcraftError::ConfigWriteFailed {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EventKey, Scope};
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let store = AssignmentStore::new(temp.path().join("assignments.json"));

        let doc = store.load();
        assert!(doc.global.is_empty());
        assert!(doc.settings.enabled);
    }

    #[test]
    fn test_load_invalid_json_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("assignments.json");
        std::fs::write(&path, "{not json").unwrap();

        let doc = AssignmentStore::new(path).load();
        assert_eq!(doc, AssignmentDocument::default());
    }

    #[test]
    fn test_load_repairs_partial_document() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("assignments.json");
        std::fs::write(&path, r#"{"global":{"Stop":"a.mp3"},"settings":"oops"}"#).unwrap();

        let doc = AssignmentStore::new(path).load();
        assert_eq!(doc.global.len(), 1);
        assert!(doc.settings.enabled);
    }

    #[test]
    fn test_save_creates_parent_dirs_and_round_trips() {
        let temp = TempDir::new().unwrap();
        let store = AssignmentStore::new(temp.path().join("nested/dir/assignments.json"));

        let mut doc = AssignmentDocument::default();
        doc.assign(&Scope::Global, EventKey::Stop, "pub/pack:stop.mp3");
        doc.assign(
            &Scope::Agent("reviewer".to_string()),
            EventKey::SubagentStop,
            "done.mp3",
        );
        store.save(&doc).unwrap();

        assert_eq!(store.load(), doc);
    }

    #[test]
    fn test_from_storage_uses_standard_location() {
        let temp = TempDir::new().unwrap();
        let storage = StorageConfig::with_root(temp.path().to_path_buf());
        let store = AssignmentStore::from_storage(&storage);
        assert_eq!(store.path(), storage.assignments_file());
    }
}
