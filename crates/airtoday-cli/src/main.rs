//! `airtoday` — local air quality and weather, with a rolling history.
//!
//! # Usage
//!
//! ```
//! airtoday fetch --lat -23.55 --lon -46.63
//! airtoday history --days 5
//! airtoday clear --yes
//! airtoday world
//! airtoday tips
//! ```

mod commands;
mod render;
mod settings;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use settings::{AppConfig, DEFAULT_CONFIG_PATH};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "airtoday", version, about = "Local air quality and weather")]
struct Cli {
  /// Path to a TOML config file (api_key, store_path, default_location, ...).
  #[arg(short, long, global = true, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
  config: PathBuf,

  /// Log at debug level (overridden by RUST_LOG).
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Print machine-readable JSON instead of text.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

/// Explicit coordinates; both or neither.
#[derive(Args, Debug, Clone, Copy)]
pub struct LocationArgs {
  /// Latitude in decimal degrees.
  #[arg(long, allow_negative_numbers = true, requires = "lon")]
  lat: Option<f64>,

  /// Longitude in decimal degrees.
  #[arg(long, allow_negative_numbers = true, requires = "lat")]
  lon: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Fetch the current reading and add it to the history.
  Fetch {
    #[command(flatten)]
    location: LocationArgs,

    /// Show the reading without recording it.
    #[arg(long)]
    no_save: bool,
  },

  /// Show recorded readings, one per day within the lookback window.
  History {
    /// Lookback window in days (default from config, normally 5).
    #[arg(long, conflicts_with = "all")]
    days: Option<i64>,

    /// Show every recorded reading instead.
    #[arg(long)]
    all: bool,
  },

  /// Delete every recorded reading.
  Clear {
    /// Skip the confirmation prompt.
    #[arg(short, long)]
    yes: bool,
  },

  /// Current air quality in a few world capitals. Not recorded.
  World,

  /// Advice for poor air quality and the local emergency number.
  Tips {
    #[command(flatten)]
    location: LocationArgs,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  // Logs go to stderr so stdout stays clean for `--json`.
  let default_level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy(),
    )
    .init();

  let cfg = AppConfig::load(&cli.config)?;
  tracing::debug!(store = %cfg.store_path.display(), base_url = %cfg.base_url, "configuration loaded");

  match cli.command {
    Command::Fetch { location, no_save } => {
      commands::fetch(&cfg, location, no_save, cli.json).await
    }
    Command::History { days, all } => commands::history(&cfg, days, all, cli.json).await,
    Command::Clear { yes } => commands::clear(&cfg, yes, cli.json).await,
    Command::World => commands::world(&cfg, cli.json).await,
    Command::Tips { location } => commands::tips(&cfg, location, cli.json).await,
  }
}
