//! Sound pack path resolution and enumeration.
//!
//! Packs live under `<packsRoot>/<publisher>/<name>/`. A sound reference is
//! either pack-qualified (`publisher/name:internal/path.mp3`) or a bare
//! internal path resolved against the default pack. Resolution is a pure
//! mapping; existence checks happen immediately before playback, not here.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Publisher of the default pack used by legacy, un-qualified references.
pub const DEFAULT_PUBLISHER: &str = "rohenaz";
/// Name of the default pack.
pub const DEFAULT_PACK: &str = "agentcraft-sounds";

/// File extensions recognized as playable audio.
pub const AUDIO_EXTENSIONS: [&str; 4] = ["mp3", "wav", "ogg", "m4a"];

/// An installed pack: one `<publisher>/<name>` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pack {
    pub publisher: String,
    pub name: String,
    pub path: PathBuf,
}

impl Pack {
    /// The `publisher/name` identifier used in qualified references.
    pub fn id(&self) -> String {
        format!("{}/{}", self.publisher, self.name)
    }
}

/// One audio file inside a pack, with its pack-qualified reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackSound {
    pub reference: String,
    pub path: PathBuf,
}

/// Maps a sound reference to an absolute path under `packs_root`.
///
/// Returns `None` for empty references, malformed pack identifiers, and any
/// internal path that could escape the packs root (`..` segments, absolute
/// paths). Does not check that the file exists.
pub fn resolve_pack_path(packs_root: &Path, reference: &str) -> Option<PathBuf> {
    if reference.is_empty() {
        return None;
    }

    let (publisher, name, internal) = match reference.split_once(':') {
        Some((pack_id, internal)) => {
            let (publisher, name) = pack_id.split_once('/')?;
            (publisher, name, internal)
        }
        // Legacy form: the whole string is a path inside the default pack.
        None => (DEFAULT_PUBLISHER, DEFAULT_PACK, reference),
    };

    if publisher.is_empty() || name.is_empty() || internal.is_empty() {
        return None;
    }
    if !is_safe_segment(publisher) || !is_safe_segment(name) || !is_safe_internal(internal) {
        return None;
    }

    Some(packs_root.join(publisher).join(name).join(internal))
}

/// A publisher or pack name must be a single plain path segment.
fn is_safe_segment(segment: &str) -> bool {
    !segment.contains(['/', '\\']) && segment != ".." && !Path::new(segment).is_absolute()
}

/// Internal paths may contain separators but no traversal segments, and must
/// stay relative so the final join cannot leave the packs root.
fn is_safe_internal(internal: &str) -> bool {
    if Path::new(internal).is_absolute() {
        return false;
    }
    !internal.split(['/', '\\']).any(|segment| segment == "..")
}

/// Lists installed packs by scanning two directory levels under `packs_root`.
/// A missing or unreadable packs root yields an empty list.
pub fn list_packs(packs_root: &Path) -> Vec<Pack> {
    let mut packs = Vec::new();
    let publishers = match std::fs::read_dir(packs_root) {
        Ok(entries) => entries,
        Err(_) => return packs,
    };
    for publisher_entry in publishers.flatten() {
        let publisher_path = publisher_entry.path();
        if !publisher_path.is_dir() {
            continue;
        }
        let Some(publisher) = publisher_entry.file_name().to_str().map(String::from) else {
            continue;
        };
        let Ok(names) = std::fs::read_dir(&publisher_path) else {
            continue;
        };
        for name_entry in names.flatten() {
            let pack_path = name_entry.path();
            if !pack_path.is_dir() {
                continue;
            }
            let Some(name) = name_entry.file_name().to_str().map(String::from) else {
                continue;
            };
            packs.push(Pack {
                publisher: publisher.clone(),
                name,
                path: pack_path,
            });
        }
    }
    packs.sort_by(|a, b| a.id().cmp(&b.id()));
    packs
}

/// Recursively enumerates the audio files of a pack, yielding pack-qualified
/// references. Non-audio files are skipped; IO errors end the walk silently.
pub fn list_pack_sounds(pack: &Pack) -> Vec<PackSound> {
    let mut sounds = Vec::new();
    for entry in WalkDir::new(&pack.path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let is_audio = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if !is_audio {
            continue;
        }
        let Ok(relative) = path.strip_prefix(&pack.path) else {
            continue;
        };
        let Some(relative) = relative.to_str() else {
            continue;
        };
        sounds.push(PackSound {
            reference: format!("{}:{}", pack.id(), relative.replace('\\', "/")),
            path: path.to_path_buf(),
        });
    }
    sounds.sort_by(|a, b| a.reference.cmp(&b.reference));
    sounds
}
