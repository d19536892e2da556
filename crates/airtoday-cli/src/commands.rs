//! Command handlers. Each one builds only the dependencies it needs from
//! [`AppConfig`] and passes them down explicitly.

use std::{
  io::{self, BufRead as _, Write as _},
  time::Duration,
};

use airtoday_core::{
  aggregator::{Acquisition, Aggregator},
  consolidate::consolidate_by_day,
  error::AcquireError,
  location::{FixedLocation, locate_within},
  lookup::AirDataSource as _,
  snapshot::Coordinates,
  store::HistoryStore,
  tips::{GENERAL_TIPS, TipSection, emergency_number},
  world::{WORLD_CAPITALS, WorldCity, survey},
};
use airtoday_openweather::{OpenWeatherClient, OpenWeatherConfig, http_client};
use airtoday_store_sqlite::SqliteStore;
use anyhow::{Context as _, Result, anyhow};
use chrono::{Local, TimeDelta, Utc};
use serde::Serialize;

use crate::{LocationArgs, render, settings::AppConfig};

// ─── Composition ──────────────────────────────────────────────────────────────

async fn open_store(cfg: &AppConfig) -> Result<SqliteStore> {
  if let Some(parent) = cfg.store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open history at {}", cfg.store_path.display()))
}

fn data_source(cfg: &AppConfig) -> Result<OpenWeatherClient> {
  let http = http_client(Duration::from_secs(cfg.timeout_secs))?;
  let config = OpenWeatherConfig { base_url: cfg.base_url.clone(), api_key: cfg.api_key.clone() };
  OpenWeatherClient::new(http, config)
    .context("set api_key in the config file or AIRTODAY_API_KEY in the environment")
}

/// Flags win over `default_location`; neither means "unavailable".
async fn resolve_location(cfg: &AppConfig, args: LocationArgs) -> Result<Coordinates> {
  let configured = match (args.lat, args.lon) {
    (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)?),
    _ => cfg.default_location.map(|l| l.coordinates()).transpose()?,
  };

  let timeout = Duration::from_secs(cfg.location_timeout_secs);
  locate_within(&FixedLocation::new(configured), timeout)
    .await
    .context("no location: pass --lat/--lon or set default_location in the config")
}

fn print_json(value: &impl Serialize) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

// ─── fetch ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct FetchOutput<'a> {
  /// Set when the reading was recorded.
  id:          Option<i64>,
  #[serde(flatten)]
  acquisition: &'a Acquisition,
}

/// Persist a successful acquisition when a store is given. A failed
/// acquisition never reaches the store.
async fn record<S: HistoryStore>(
  result: Result<Acquisition, AcquireError>,
  store: Option<&S>,
) -> Result<(Acquisition, Option<i64>)> {
  let acquisition = result.map_err(|e| anyhow!("error loading data: {e}"))?;
  let Some(store) = store else {
    return Ok((acquisition, None));
  };
  let stored = store
    .insert(acquisition.snapshot.clone())
    .await
    .context("failed to record reading")?;
  Ok((acquisition, Some(stored.id)))
}

pub async fn fetch(cfg: &AppConfig, location: LocationArgs, no_save: bool, json: bool) -> Result<()> {
  let at = resolve_location(cfg, location).await?;
  let aggregator = Aggregator::new(data_source(cfg)?);
  let result = aggregator.acquire(at).await;

  let store = match (&result, no_save) {
    (Ok(_), false) => Some(open_store(cfg).await?),
    _ => None,
  };
  let (acquisition, id) = record(result, store.as_ref()).await?;

  if json {
    print_json(&FetchOutput { id, acquisition: &acquisition })
  } else {
    print!("{}", render::acquisition(&acquisition, &Local));
    Ok(())
  }
}

// ─── history ──────────────────────────────────────────────────────────────────

/// The lookback window for `days`. Negative counts are empty; counts too
/// large for a duration are unbounded.
fn lookback(days: i64) -> TimeDelta {
  TimeDelta::try_days(days.max(0)).unwrap_or(TimeDelta::MAX)
}

pub async fn history(cfg: &AppConfig, days: Option<i64>, all: bool, json: bool) -> Result<()> {
  let store = open_store(cfg).await?;
  let rows = store.list_all().await.context("failed to read history")?;

  let rows = if all {
    rows
  } else {
    let window = lookback(days.unwrap_or(cfg.lookback_days));
    consolidate_by_day(rows, Utc::now(), window, &Local)
  };

  if json {
    print_json(&rows)
  } else {
    print!("{}", render::history(&rows, &Local));
    Ok(())
  }
}

// ─── clear ────────────────────────────────────────────────────────────────────

fn confirm(prompt: &str) -> Result<bool> {
  print!("{prompt} [y/N] ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

pub async fn clear(cfg: &AppConfig, yes: bool, json: bool) -> Result<()> {
  if !yes && !confirm("Delete all recorded readings?")? {
    println!("Nothing deleted.");
    return Ok(());
  }

  let store = open_store(cfg).await?;
  let removed = store.clear().await.context("failed to clear history")?;

  if json {
    print_json(&serde_json::json!({ "removed": removed }))
  } else {
    println!("Deleted {removed} reading(s).");
    Ok(())
  }
}

// ─── world ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct WorldOutput<'a> {
  city:        &'a WorldCity,
  #[serde(skip_serializing_if = "Option::is_none")]
  acquisition: Option<&'a Acquisition>,
  #[serde(skip_serializing_if = "Option::is_none")]
  error:       Option<&'a AcquireError>,
}

pub async fn world(cfg: &AppConfig, json: bool) -> Result<()> {
  let aggregator = Aggregator::new(data_source(cfg)?);
  let readings = survey(&aggregator, WORLD_CAPITALS).await;

  if json {
    let out: Vec<WorldOutput<'_>> = readings
      .iter()
      .map(|r| WorldOutput {
        city:        &r.city,
        acquisition: r.result.as_ref().ok(),
        error:       r.result.as_ref().err(),
      })
      .collect();
    print_json(&out)
  } else {
    print!("{}", render::world(&readings, &Local));
    Ok(())
  }
}

// ─── tips ─────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TipsOutput {
  sections:         &'static [TipSection],
  emergency_number: &'static str,
  country:          Option<String>,
}

/// Best effort: any missing piece falls back to the default number.
async fn current_country(cfg: &AppConfig, location: LocationArgs) -> Option<String> {
  let at = match resolve_location(cfg, location).await {
    Ok(at) => at,
    Err(e) => {
      tracing::debug!(error = %e, "no location for tips");
      return None;
    }
  };
  let source = match data_source(cfg) {
    Ok(s) => s,
    Err(e) => {
      tracing::debug!(error = %e, "no data source for tips");
      return None;
    }
  };
  source.reverse_geocode(at).await.found().and_then(|p| p.country)
}

pub async fn tips(cfg: &AppConfig, location: LocationArgs, json: bool) -> Result<()> {
  let country = current_country(cfg, location).await;
  let number  = emergency_number(country.as_deref());

  if json {
    print_json(&TipsOutput { sections: GENERAL_TIPS, emergency_number: number, country })
  } else {
    print!("{}", render::tips(GENERAL_TIPS, number));
    Ok(())
  }
}
