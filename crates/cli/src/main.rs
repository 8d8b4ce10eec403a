use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use softnav_engine::SlotSettings;
use softnav_types::Rotation;
use tracing::Level;

/// Interactive preview and diagnostics for the configurable navigation bar.
#[derive(Debug, Parser)]
#[command(name = "softnav", version, about)]
struct Cli {
    /// Path to the slot settings file (overrides SOFTNAV_SETTINGS_PATH).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Initial rotation in degrees (0, 90, 180 or 270).
    #[arg(long, default_value_t = 0)]
    rotation: u16,

    /// Print the diagnostics dump and exit.
    #[arg(long)]
    dump: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let rotation = Rotation::from_degrees(cli.rotation)
        .with_context(|| format!("invalid rotation {}; expected 0, 90, 180 or 270", cli.rotation))?;
    let settings = match cli.settings {
        Some(path) => SlotSettings::at(path)?,
        None => SlotSettings::new().unwrap_or_else(|error| {
            tracing::warn!(%error, "falling back to in-memory slot settings");
            SlotSettings::ephemeral()
        }),
    };

    if cli.dump {
        return softnav_tui::dump_to_stdout(settings, rotation);
    }

    softnav_tui::run(settings, rotation).await
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .try_init();
}
