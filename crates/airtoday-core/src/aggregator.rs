//! The air-quality aggregator: three lookups in, one reading out.
//!
//! The aggregator never touches the history. Persisting a successful
//! acquisition is the caller's decision.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  error::AcquireError,
  lookup::{AirDataSource, Lookup, LookupStatus},
  snapshot::{Coordinates, NewSnapshot, UNKNOWN_LOCATION},
};

/// A successful acquisition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acquisition {
  pub snapshot: NewSnapshot,
  /// How the place-name lookup went. When this is not `Found`, the snapshot's
  /// location name is [`UNKNOWN_LOCATION`].
  pub place:    LookupStatus,
}

/// Combines reverse geocoding, pollution and weather lookups into a
/// [`NewSnapshot`].
pub struct Aggregator<S> {
  source: S,
  clock:  fn() -> DateTime<Utc>,
}

impl<S: AirDataSource> Aggregator<S> {
  pub fn new(source: S) -> Self { Self { source, clock: Utc::now } }

  /// Replace the wall clock used to stamp captures.
  pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
    self.clock = clock;
    self
  }

  pub fn source(&self) -> &S { &self.source }

  /// Run all three lookups for `at` and merge them.
  ///
  /// Succeeds only when both the pollution and weather lookups found data. A
  /// missing place name is tolerated and replaced by [`UNKNOWN_LOCATION`].
  pub async fn acquire(&self, at: Coordinates) -> Result<Acquisition, AcquireError> {
    let (place, pollution, weather) = tokio::join!(
      self.source.reverse_geocode(at),
      self.source.air_pollution(at),
      self.source.current_weather(at),
    );

    log_miss("reverse geocode", at, &place);
    log_miss("air pollution", at, &pollution);
    log_miss("current weather", at, &weather);

    let (pollution, weather) = match (pollution, weather) {
      (Lookup::Found(p), Lookup::Found(w)) => (p, w),
      (p, w) => {
        return Err(AcquireError { pollution: p.status(), weather: w.status() });
      }
    };

    let place_status  = place.status();
    let location_name = place
      .found()
      .map(|p| p.name)
      .filter(|name| !name.trim().is_empty())
      .unwrap_or_else(|| UNKNOWN_LOCATION.to_owned());

    let snapshot = NewSnapshot {
      location_name,
      aqi: Some(pollution.aqi),
      temperature: weather.temperature,
      humidity: weather.humidity,
      components: pollution.components,
      captured_at: (self.clock)(),
    };

    tracing::debug!(
      location = %snapshot.location_name,
      aqi = pollution.aqi,
      "acquired reading"
    );

    Ok(Acquisition { snapshot, place: place_status })
  }
}

fn log_miss<T>(what: &str, at: Coordinates, lookup: &Lookup<T>) {
  match lookup {
    Lookup::Found(_) => {}
    Lookup::NotFound => tracing::info!(%at, "{what}: no data"),
    Lookup::Failed(e) => tracing::warn!(%at, error = %e, "{what} failed"),
  }
}
