//! Layered configuration: TOML file, then `AIRTODAY_*` environment variables.
//! Command-line flags are applied on top by the caller.

use std::path::{Path, PathBuf};

use airtoday_core::{consolidate::DEFAULT_LOOKBACK_DAYS, snapshot::Coordinates};
use airtoday_openweather::DEFAULT_BASE_URL;
use anyhow::{Context as _, Result};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "~/.config/airtoday/config.toml";

/// Runtime configuration, deserialised from the layered sources.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// OpenWeatherMap API key. Only needed by commands that go online.
  #[serde(default)]
  pub api_key:               String,
  #[serde(default = "default_base_url")]
  pub base_url:              String,
  #[serde(default = "default_store_path")]
  pub store_path:            PathBuf,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs:          u64,
  #[serde(default = "default_lookback_days")]
  pub lookback_days:         i64,
  #[serde(default = "default_location_timeout_secs")]
  pub location_timeout_secs: u64,
  /// Used when no coordinates are given on the command line.
  #[serde(default)]
  pub default_location:      Option<LocationConfig>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LocationConfig {
  pub latitude:  f64,
  pub longitude: f64,
}

impl LocationConfig {
  pub fn coordinates(self) -> Result<Coordinates> {
    Coordinates::new(self.latitude, self.longitude).context("invalid default_location")
  }
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_owned() }
fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/airtoday/history.db") }
fn default_timeout_secs() -> u64 { 10 }
fn default_lookback_days() -> i64 { DEFAULT_LOOKBACK_DAYS }
fn default_location_timeout_secs() -> u64 { 5 }

impl AppConfig {
  /// Read `path` (optional on disk) and the environment.
  pub fn load(path: &Path) -> Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(expand_tilde(path)).required(false))
      .add_source(
        config::Environment::with_prefix("AIRTODAY")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .with_context(|| format!("failed to read config from {}", path.display()))?;

    let mut cfg: Self = settings
      .try_deserialize()
      .context("failed to deserialise configuration")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    Ok(cfg)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
