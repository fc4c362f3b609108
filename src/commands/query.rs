//! Query command handlers.

use super::{load_devices, CommandResult};
use anyhow::Context;
use ratbag_bind::macro_seq::parse_keycode;
use ratbag_model::input_codes;
use ratbag_model::snapshot::{ButtonAction, ProfileSnapshot};
use ratbag_model::{load_device, NativeContext, NativeDevice};
use std::path::Path;

/// List devices in the device file
pub fn list(devices: &Path) -> CommandResult {
    let ctx = load_devices(devices)?;
    let names = ctx.sysnames();
    if names.is_empty() {
        println!("No devices in {}", devices.display());
        return Ok(());
    }
    for sysname in names {
        let dev = ctx.device(&sysname)?;
        println!(
            "{sysname:10} {} [{}] {} profiles",
            dev.name(),
            dev.ids(),
            dev.num_profiles()
        );
    }
    Ok(())
}

/// Print a device snapshot
pub fn info(devices: &Path, sysname: &str, json: bool) -> CommandResult {
    let ctx = load_devices(devices)?;
    let snap = load_device(ctx.device(sysname)?)
        .with_context(|| format!("reading device {sysname}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snap)?);
        return Ok(());
    }

    println!("Device:   {} ({})", snap.name, snap.sysname);
    println!("IDs:      {} (model {})", snap.ids, snap.ids.model());
    println!("Type:     {:?}", snap.device_type);
    if !snap.firmware_version.is_empty() {
        println!("Firmware: {}", snap.firmware_version);
    }
    for profile in &snap.profiles {
        print_profile(profile);
    }
    Ok(())
}

fn print_profile(profile: &ProfileSnapshot) {
    let marker = if profile.is_active { " (active)" } else { "" };
    let state = if profile.is_enabled { "" } else { " [disabled]" };
    println!(
        "\nProfile {}: {}{marker}{state}",
        profile.index,
        profile.name.as_deref().unwrap_or("<unnamed>")
    );
    if !profile.capabilities.is_empty() {
        println!("  Capabilities: {:?}", profile.capabilities);
    }
    println!(
        "  Report rate: {} Hz (supported: {:?})",
        profile.report_rate, profile.report_rates
    );
    if let Some(ms) = profile.debounce {
        println!("  Debounce: {ms} ms (supported: {:?})", profile.debounces);
    }

    for res in &profile.resolutions {
        let mut flags = Vec::new();
        if res.is_active {
            flags.push("active");
        }
        if res.is_default {
            flags.push("default");
        }
        if res.is_disabled {
            flags.push("disabled");
        }
        let dpi = if res.dpi.0 == res.dpi.1 {
            format!("{}", res.dpi.0)
        } else {
            format!("{}x{}", res.dpi.0, res.dpi.1)
        };
        println!("  Resolution {}: {dpi} dpi {flags:?}", res.index);
    }

    for button in &profile.buttons {
        let action = match &button.action {
            ButtonAction::None => "none".to_string(),
            ButtonAction::Button { button } => format!("button {button}"),
            ButtonAction::Special { special } => format!("special {special}"),
            ButtonAction::Key { key } => format!("key {}", input_codes::display_name(*key)),
            ButtonAction::Macro { events } => format!("macro ({events} events)"),
            ButtonAction::Unknown => "unknown".to_string(),
        };
        println!("  Button {}: {action}", button.index);
    }

    for led in &profile.leds {
        print!("  LED {}: {} #{}", led.index, led.mode.name(), led.color);
        if led.mode.has_duration() {
            print!(" {} ms", led.effect_duration);
        }
        println!(" brightness {}", led.brightness);
    }
}

/// Look up a keycode by number or name
pub fn keycode(key: &str) -> CommandResult {
    let code = parse_keycode(key)?;
    let names = input_codes::key_names(code);
    if names.is_empty() {
        println!("{code} (0x{code:03x}): {} (unnamed)", input_codes::display_name(code));
    } else {
        println!("{code} (0x{code:03x}): {}", names.join(", "));
    }
    Ok(())
}
