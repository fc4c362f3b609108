//! Macro library command handlers.

use super::{load_library, resolve_macro, CommandResult};
use anyhow::{bail, Context};
use std::path::Path;

/// Save macro text under a name
pub fn save(library: &Path, name: &str, text: &str) -> CommandResult {
    if name.is_empty() || name.starts_with('@') {
        bail!("invalid macro name \"{name}\"");
    }
    let seq = resolve_macro(text, library)?;
    let mut lib = load_library(library)?;
    let replaced = lib.insert(name, &seq).is_some();
    lib.save(library)
        .with_context(|| format!("writing {}", library.display()))?;

    let verb = if replaced { "Updated" } else { "Saved" };
    println!("{verb} \"{name}\": {seq}");
    Ok(())
}

/// Show one saved macro
pub fn show(library: &Path, name: &str) -> CommandResult {
    let lib = load_library(library)?;
    let Some(entry) = lib.get(name) else {
        bail!("no macro named \"{name}\"");
    };
    let seq = entry.sequence();
    println!("{name}: {seq}");
    if !seq.is_empty() {
        println!("Sequence: {}", seq.to_syntax());
    }
    Ok(())
}

/// List saved macros
pub fn list(library: &Path) -> CommandResult {
    let lib = load_library(library)?;
    if lib.is_empty() {
        println!("No saved macros in {}", library.display());
        return Ok(());
    }
    let width = lib.list().iter().map(|m| m.name.len()).max().unwrap_or(0);
    for entry in lib.list() {
        println!("{:width$}  {}", entry.name, entry.sequence());
    }
    Ok(())
}

/// Remove a saved macro
pub fn forget(library: &Path, name: &str) -> CommandResult {
    let mut lib = load_library(library)?;
    if lib.remove(name).is_none() {
        bail!("no macro named \"{name}\"");
    }
    lib.save(library)
        .with_context(|| format!("writing {}", library.display()))?;
    println!("Removed \"{name}\"");
    Ok(())
}
