//! agentcraft-hook: CLI hook handler that plays AgentCraft sounds on Claude
//! Code lifecycle events.
//!
//! Called directly by Claude Code hooks configured in ~/.claude/settings.json.
//! Reads the hook event JSON from stdin, resolves the assigned sound (skill
//! override → agent override → global, per ~/.agentcraft/assignments.json),
//! and plays it fire-and-forget.
//!
//! ## Subcommands
//!
//! - `handle`: Main hook handler, reads JSON from stdin
//! - `resolve`: Dry-run resolution for an event, prints instead of playing
//! - `packs`: List installed sound packs

mod event;
mod handle;
mod logging;
mod playback;

use agentcraft_core::engine::ScopeHint;
use agentcraft_core::types::EventKey;
use agentcraft_core::{capabilities_for, list_pack_sounds, list_packs};
use agentcraft_core::{resolve_event, resolve_pack_path, AssignmentStore, StorageConfig};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "agentcraft-hook")]
#[command(about = "Plays AgentCraft sounds on Claude Code lifecycle events")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle a hook event (reads JSON from stdin)
    Handle,

    /// Resolve the sound for an event without playing it
    Resolve {
        /// Event key (e.g. Stop, PreToolUse, SessionStart)
        #[arg(value_name = "EVENT")]
        event: String,

        /// Agent name for the agent-override tier
        #[arg(long)]
        agent: Option<String>,

        /// Qualified skill name for the skill-override tier
        #[arg(long)]
        skill: Option<String>,

        /// Host integration to check capabilities against
        #[arg(long, default_value = "claude-code")]
        host: String,
    },

    /// List installed sound packs
    Packs,
}

fn main() {
    let _logging_guard = logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Handle => {
            // Sound cues are cosmetic: log failures but exit 0 so a broken
            // config can never block a Claude Code hook.
            if let Err(e) = handle::run() {
                tracing::warn!(error = %e, "agentcraft-hook handle failed");
            }
        }
        Commands::Resolve {
            event,
            agent,
            skill,
            host,
        } => {
            if let Err(e) = run_resolve(&event, agent, skill, &host) {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
        Commands::Packs => {
            if let Err(e) = run_packs() {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }
}

fn run_resolve(
    event: &str,
    agent: Option<String>,
    skill: Option<String>,
    host: &str,
) -> Result<(), String> {
    let event: EventKey = event
        .parse()
        .map_err(|()| format!("Unknown event key: {}", event))?;

    let profile = capabilities_for(host);
    let skill_scope = skill.is_some();
    if skill_scope && !profile.supports_skill_event(event) {
        println!(
            "note: {} does not fire {} at skill scope",
            profile.label, event
        );
    } else if !profile.supports_event(event) {
        println!("note: {} cannot observe {}", profile.label, event);
        if let Some(note) = profile.note(event) {
            println!("      {}", note);
        }
    } else if let Some(native) = profile.native_name(event) {
        println!("native:    {} ({})", native, profile.label);
    }
    if agent.is_some() && !profile.supports_agent_overrides {
        println!(
            "note: {} events carry no agent identity; agent overrides only apply elsewhere",
            profile.label
        );
    }

    let storage = StorageConfig::from_home().map_err(|e| e.to_string())?;
    let doc = AssignmentStore::from_storage(&storage).load();
    let hint = ScopeHint { agent, skill };

    match resolve_event(&doc, event, &hint) {
        Some(resolution) => {
            println!("reference: {}", resolution.reference);
            println!("volume:    {}", resolution.volume);
            match resolve_pack_path(&storage.packs_dir(), &resolution.reference) {
                Some(path) => println!("path:      {}", path.display()),
                None => println!("path:      (unresolvable reference)"),
            }
        }
        None => println!("no sound assigned"),
    }
    Ok(())
}

fn run_packs() -> Result<(), String> {
    let storage = StorageConfig::from_home().map_err(|e| e.to_string())?;
    let packs = list_packs(&storage.packs_dir());
    if packs.is_empty() {
        println!("no packs installed under {}", storage.packs_dir().display());
        return Ok(());
    }
    for pack in packs {
        let sounds = list_pack_sounds(&pack);
        println!("{}  ({} sounds)", pack.id(), sounds.len());
    }
    Ok(())
}
