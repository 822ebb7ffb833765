//! Sound-slot values.
//!
//! A slot is the value at one (scope, event) coordinate in the assignment
//! document: absent, a single sound reference, or a list of alternatives that
//! are picked from uniformly at random. The persisted JSON form stays
//! string-or-array for compatibility with existing assignment files; the
//! tagged representation lives only in memory.
//!
//! Every operation here is total. Malformed input (wrong JSON type, empty
//! strings) is treated as absent, never as an error.

use rand::Rng;
use serde::de::Deserializer;
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A configuration leaf: no sound, one sound, or several alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SoundSlot {
    #[default]
    Empty,
    Single(String),
    Many(Vec<String>),
}

impl SoundSlot {
    /// Builds a slot from an untrusted JSON value.
    ///
    /// Strings become `Single`, arrays keep their string entries (falsy and
    /// empty entries dropped), anything else is `Empty`.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => {
                if s.is_empty() {
                    SoundSlot::Empty
                } else {
                    SoundSlot::Single(s.clone())
                }
            }
            Value::Array(items) => {
                let refs: Vec<String> = items
                    .iter()
                    .filter_map(|item| item.as_str())
                    .filter(|s| !s.is_empty())
                    .map(|s| s.to_string())
                    .collect();
                SoundSlot::from_refs(refs)
            }
            _ => SoundSlot::Empty,
        }
    }

    /// Builds a slot from a reference list, collapsing the representation:
    /// zero entries is `Empty`, one is `Single`, more is `Many`.
    pub fn from_refs(mut refs: Vec<String>) -> Self {
        refs.retain(|r| !r.is_empty());
        match refs.len() {
            0 => SoundSlot::Empty,
            1 => SoundSlot::Single(refs.into_iter().next().unwrap()),
            _ => SoundSlot::Many(refs),
        }
    }

    /// Returns the slot as an ordered reference sequence, with empty entries
    /// filtered out. Idempotent: normalizing an already-normalized slot
    /// yields the same sequence.
    pub fn normalize(&self) -> Vec<String> {
        match self {
            SoundSlot::Empty => Vec::new(),
            SoundSlot::Single(r) => {
                if r.is_empty() {
                    Vec::new()
                } else {
                    vec![r.clone()]
                }
            }
            SoundSlot::Many(refs) => refs.iter().filter(|r| !r.is_empty()).cloned().collect(),
        }
    }

    /// True if the slot normalizes to no references at all.
    pub fn is_empty(&self) -> bool {
        match self {
            SoundSlot::Empty => true,
            SoundSlot::Single(r) => r.is_empty(),
            SoundSlot::Many(refs) => refs.iter().all(|r| r.is_empty()),
        }
    }

    /// Picks one reference: `None` if empty, the sole element if single,
    /// a uniformly random element otherwise.
    pub fn pick_one(&self) -> Option<String> {
        self.pick_one_with(&mut rand::thread_rng())
    }

    /// [`pick_one`](Self::pick_one) with an injected RNG for deterministic tests.
    pub fn pick_one_with<R: Rng>(&self, rng: &mut R) -> Option<String> {
        let refs = self.normalize();
        match refs.len() {
            0 => None,
            1 => refs.into_iter().next(),
            n => {
                let index = rng.gen_range(0..n);
                refs.into_iter().nth(index)
            }
        }
    }

    /// Adds `reference` unless an identical entry is already present.
    pub fn append(&self, reference: &str) -> SoundSlot {
        let mut refs = self.normalize();
        if reference.is_empty() || refs.iter().any(|r| r == reference) {
            return SoundSlot::from_refs(refs);
        }
        refs.push(reference.to_string());
        SoundSlot::from_refs(refs)
    }

    /// Removes `reference` if present. The result collapses back to
    /// `Single` or `Empty` as entries run out.
    pub fn remove(&self, reference: &str) -> SoundSlot {
        let mut refs = self.normalize();
        refs.retain(|r| r != reference);
        SoundSlot::from_refs(refs)
    }
}

// Persisted form: Single as a bare string, Many as an array. Empty slots are
// pruned from maps before serialization, but serialize as null if reached.
impl Serialize for SoundSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SoundSlot::Empty => serializer.serialize_none(),
            SoundSlot::Single(r) => serializer.serialize_str(r),
            SoundSlot::Many(refs) => {
                let mut seq = serializer.serialize_seq(Some(refs.len()))?;
                for r in refs {
                    seq.serialize_element(r)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for SoundSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(SoundSlot::from_value(&value))
    }
}
