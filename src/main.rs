//! ratbag-bind CLI
//!
//! Inspect simulated mouse devices and program button macros.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{Cli, Commands};

mod commands;
use commands::Paths;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("ratbag_bind={level}").parse()?)
                .add_directive(format!("ratbag_model={level}").parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let paths = Paths::new(cli.devices, cli.library);

    match cli.command {
        // === Device Commands ===
        Commands::List => commands::query::list(&paths.devices),
        Commands::Info { device, json } => commands::query::info(&paths.devices, &device, json),

        // === Macro Commands ===
        Commands::Render { events } => commands::macros::render(&events),
        Commands::GetMacro {
            device,
            profile,
            button,
            syntax,
        } => commands::macros::get_macro(&paths, &device, profile, button, syntax),
        Commands::SetMacro {
            device,
            profile,
            button,
            events,
        } => commands::macros::set_macro(&paths, &device, profile, button, &events),

        // === Library Commands ===
        Commands::Save { name, events } => commands::library::save(&paths.library, &name, &events),
        Commands::Show { name } => commands::library::show(&paths.library, &name),
        Commands::Library => commands::library::list(&paths.library),
        Commands::Forget { name } => commands::library::forget(&paths.library, &name),

        // === Utility ===
        Commands::Keycode { key } => commands::query::keycode(&key),
    }
}
