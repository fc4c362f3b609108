//! Named macro library stored as TOML
//!
//! ```toml
//! [[macro]]
//! name = "copy"
//! events = [
//!     { kind = "key-press", value = 29 },
//!     { kind = "key-press", value = 46 },
//!     { kind = "key-release", value = 46 },
//!     { kind = "key-release", value = 29 },
//! ]
//! ```

use crate::macro_seq::{MacroEvent, MacroSequence};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid macro library: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize macro library: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// One saved macro
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedMacro {
    pub name: String,
    #[serde(default)]
    pub events: Vec<MacroEvent>,
}

impl NamedMacro {
    /// Events as a sequence; duplicates written by hand into the file are
    /// collapsed here.
    pub fn sequence(&self) -> MacroSequence {
        MacroSequence::from_events(self.events.iter().copied())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroLibrary {
    #[serde(default, rename = "macro")]
    macros: Vec<NamedMacro>,
}

impl MacroLibrary {
    /// `$XDG_CONFIG_HOME/ratbag-bind/macros.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ratbag-bind")
            .join("macros.toml")
    }

    /// Load a library, or an empty one if the file does not exist
    pub fn load(path: &Path) -> Result<Self, LibraryError> {
        if !path.exists() {
            debug!("No macro library at {}", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let library: Self = toml::from_str(&content)?;
        debug!("Loaded {} macros from {}", library.macros.len(), path.display());
        Ok(library)
    }

    pub fn save(&self, path: &Path) -> Result<(), LibraryError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&NamedMacro> {
        self.macros.iter().find(|m| m.name == name)
    }

    /// Store `seq` under `name`, replacing and returning any previous entry.
    pub fn insert(&mut self, name: &str, seq: &MacroSequence) -> Option<NamedMacro> {
        let entry = NamedMacro {
            name: name.to_string(),
            events: seq.events().to_vec(),
        };
        match self.macros.iter_mut().find(|m| m.name == name) {
            Some(existing) => Some(std::mem::replace(existing, entry)),
            None => {
                self.macros.push(entry);
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<NamedMacro> {
        let pos = self.macros.iter().position(|m| m.name == name)?;
        Some(self.macros.remove(pos))
    }

    /// Saved macros in insertion order
    pub fn list(&self) -> &[NamedMacro] {
        &self.macros
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}
