//! Command handlers for the CLI application.
//!
//! - `query`: read-only device commands (list, info, keycode)
//! - `macros`: button macro commands (render, get-macro, set-macro)
//! - `library`: saved macro commands (save, show, library, forget)

pub mod library;
pub mod macros;
pub mod query;

use anyhow::{bail, Context};
use ratbag_bind::library::MacroLibrary;
use ratbag_bind::macro_seq::{parse_event_list, MacroSequence};
use ratbag_model::MemoryContext;
use std::path::{Path, PathBuf};

/// Result type for command handlers
pub type CommandResult = anyhow::Result<()>;

/// Files the commands operate on
pub struct Paths {
    pub devices: PathBuf,
    pub library: PathBuf,
}

impl Paths {
    pub fn new(devices: Option<PathBuf>, library: Option<PathBuf>) -> Self {
        Self {
            devices: devices.unwrap_or_else(default_devices_path),
            library: library.unwrap_or_else(MacroLibrary::default_path),
        }
    }
}

/// `$XDG_CONFIG_HOME/ratbag-bind/devices.json`
pub fn default_devices_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ratbag-bind")
        .join("devices.json")
}

pub fn load_devices(path: &Path) -> anyhow::Result<MemoryContext> {
    MemoryContext::load(path).with_context(|| format!("loading devices from {}", path.display()))
}

pub fn load_library(path: &Path) -> anyhow::Result<MacroLibrary> {
    MacroLibrary::load(path)
        .with_context(|| format!("loading macro library from {}", path.display()))
}

/// Parse macro text into a sequence, resolving `@name` against the library.
pub fn resolve_macro(text: &str, library: &Path) -> anyhow::Result<MacroSequence> {
    if let Some(name) = text.strip_prefix('@') {
        let lib = load_library(library)?;
        let Some(entry) = lib.get(name) else {
            bail!("no macro named \"{name}\" in {}", library.display());
        };
        return Ok(entry.sequence());
    }
    let events = parse_event_list(text).with_context(|| format!("parsing macro \"{text}\""))?;
    Ok(MacroSequence::from_events(events))
}
