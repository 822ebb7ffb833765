//! # agentcraft-core
//!
//! Core library for AgentCraft: assigns audio cues to the lifecycle events
//! of AI coding-agent hosts and decides which sound (if any) to play when an
//! event fires. Shared by every host integration and the dashboard.
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime dependency. Host integrations wrap
//!   with async if their plugin API requires it.
//! - **Graceful degradation**: Every failure on the event-handling path
//!   degrades to "play nothing". A cosmetic sound cue must never interrupt a
//!   coding-agent host.
//! - **Host-agnostic core**: The resolution engine knows nothing about any
//!   host; per-host differences live entirely in the capability table and
//!   the per-host adapters.
//! - **Independent readers**: Each host process loads `assignments.json`
//!   fresh at resolution time and keeps only its own dedup state.
//!
//! ## Resolution pipeline
//!
//! ```text
//! native event → hosts (canonical EventKey) → DedupGuard → AssignmentStore
//!   → resolve_event (skill → agent → global) → packs (absolute path)
//!   → playback (external, fire-and-forget)
//! ```

pub mod dedup;
pub mod engine;
pub mod error;
pub mod hosts;
pub mod packs;
pub mod slot;
pub mod storage;
pub mod store;
pub mod types;

pub use dedup::{DedupGuard, DEDUP_WINDOW_MS};
pub use engine::{resolve_event, Resolution, ScopeHint};
pub use error::{AgentcraftError, Result};
pub use hosts::{capabilities_for, is_supported, HostId, HostProfile};
pub use packs::{list_pack_sounds, list_packs, resolve_pack_path, Pack, PackSound};
pub use slot::SoundSlot;
pub use storage::StorageConfig;
pub use store::AssignmentStore;
pub use types::{AssignmentDocument, EventKey, Scope, ScopeConfig, Settings};
