// CLI definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ratbag-bind")]
#[command(author, version, about = "Inspect and program mouse button macros")]
#[command(propagate_version = true)]
pub struct Cli {
    /// JSON device file (default: $XDG_CONFIG_HOME/ratbag-bind/devices.json)
    #[arg(long, global = true, value_name = "FILE")]
    pub devices: Option<PathBuf>,

    /// TOML macro library (default: $XDG_CONFIG_HOME/ratbag-bind/macros.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub library: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    // === Device Commands ===
    /// List devices in the device file
    #[command(visible_aliases = ["ls", "l"])]
    List,

    /// Show profiles, resolutions, buttons and LEDs of a device
    #[command(visible_aliases = ["show-device", "i"])]
    Info {
        /// Device sysname (e.g. hidraw0)
        device: String,
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    // === Macro Commands ===
    /// Render a macro without touching any device
    #[command(visible_alias = "r")]
    Render {
        /// Macro text, e.g. "+leftctrl, c, -leftctrl, 50ms"
        events: String,
    },

    /// Show the macro bound to a button
    #[command(visible_alias = "gm")]
    GetMacro {
        device: String,
        profile: usize,
        button: usize,
        /// Also print the editable text form
        #[arg(long)]
        syntax: bool,
    },

    /// Bind a macro to a button and commit the device
    #[command(visible_alias = "sm")]
    SetMacro {
        device: String,
        profile: usize,
        button: usize,
        /// Macro text, or @name for a macro from the library
        events: String,
    },

    // === Library Commands ===
    /// Save a macro to the library
    Save {
        name: String,
        /// Macro text
        events: String,
    },

    /// Show a macro from the library
    Show { name: String },

    /// List saved macros
    #[command(visible_aliases = ["lib", "macros"])]
    Library,

    /// Remove a macro from the library
    #[command(visible_aliases = ["rm", "delete"])]
    Forget { name: String },

    // === Utility ===
    /// Look up a keycode by number or name
    #[command(visible_aliases = ["key", "k"])]
    Keycode {
        /// Keycode (30, 0x1e) or name (KEY_A, a)
        key: String,
    },
}
