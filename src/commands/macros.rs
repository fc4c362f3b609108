//! Macro command handlers.

use super::{load_devices, resolve_macro, CommandResult, Paths};
use anyhow::Context;
use ratbag_bind::button_macro::{load_macro, store_macro};
use ratbag_bind::macro_seq::{parse_event_list, MacroSequence};
use ratbag_model::{NativeContext, NativeDevice, NativeProfile};
use tracing::info;

/// Parse, deduplicate and render macro text
pub fn render(text: &str) -> CommandResult {
    let events = parse_event_list(text)?;
    let parsed = events.len();
    let seq = MacroSequence::from_events(events);
    println!("{seq}");
    if seq.len() != parsed {
        println!("({} adjacent duplicate events dropped)", parsed - seq.len());
    }
    Ok(())
}

/// Show the macro bound to a button
pub fn get_macro(
    paths: &Paths,
    sysname: &str,
    profile: usize,
    button: usize,
    syntax: bool,
) -> CommandResult {
    let ctx = load_devices(&paths.devices)?;
    let btn = ctx.device(sysname)?.profile(profile)?.button(button)?;
    let seq = load_macro(btn)
        .with_context(|| format!("reading macro of {sysname} profile {profile} button {button}"))?;

    println!("{seq}");
    if syntax && !seq.is_empty() {
        println!("Sequence: {}", seq.to_syntax());
    }
    Ok(())
}

/// Bind a macro to a button, commit, and write the device file back
pub fn set_macro(
    paths: &Paths,
    sysname: &str,
    profile: usize,
    button: usize,
    text: &str,
) -> CommandResult {
    let seq = resolve_macro(text, &paths.library)?;

    let mut ctx = load_devices(&paths.devices)?;
    let dev = ctx.device_mut(sysname)?;
    let btn = dev.profile_mut(profile)?.button_mut(button)?;
    store_macro(btn, &seq)
        .with_context(|| format!("storing macro on {sysname} profile {profile} button {button}"))?;
    dev.commit().with_context(|| format!("committing {sysname}"))?;

    ctx.save(&paths.devices)
        .with_context(|| format!("writing {}", paths.devices.display()))?;
    info!("{sysname}: profile {profile} button {button} -> {seq}");
    println!("Profile {profile} button {button}: {seq}");
    Ok(())
}
