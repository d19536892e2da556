//! Snapshot — one air-quality and weather reading at a point in time.
//!
//! Snapshots are immutable. The history table only ever sees inserts and a
//! bulk delete; a row is never updated after it has been written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, aqi::AqiLevel};

/// Placeholder stored as the location name when reverse geocoding yields
/// nothing usable.
pub const UNKNOWN_LOCATION: &str = "Unknown location";

// ─── Coordinates ─────────────────────────────────────────────────────────────

/// A latitude/longitude pair in decimal degrees (WGS 84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
  pub latitude:  f64,
  pub longitude: f64,
}

impl Coordinates {
  /// Build a coordinate pair, rejecting values outside the valid ranges.
  pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
      return Err(Error::InvalidLatitude(latitude));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
      return Err(Error::InvalidLongitude(longitude));
    }
    Ok(Self { latitude, longitude })
  }
}

impl std::fmt::Display for Coordinates {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
  }
}

// ─── Pollutants ──────────────────────────────────────────────────────────────

/// Pollutant concentrations in µg/m³, as reported alongside the index.
/// Every field is optional; providers omit what they do not measure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
  pub pm2_5: Option<f64>,
  pub pm10:  Option<f64>,
  pub o3:    Option<f64>,
  pub no2:   Option<f64>,
  pub so2:   Option<f64>,
  pub co:    Option<f64>,
}

impl Components {
  pub fn is_empty(&self) -> bool {
    self.pm2_5.is_none()
      && self.pm10.is_none()
      && self.o3.is_none()
      && self.no2.is_none()
      && self.so2.is_none()
      && self.co.is_none()
  }

  /// `(label, value)` pairs for the components that are present.
  pub fn present(&self) -> Vec<(&'static str, f64)> {
    [
      ("PM2.5", self.pm2_5),
      ("PM10", self.pm10),
      ("O3", self.o3),
      ("NO2", self.no2),
      ("SO2", self.so2),
      ("CO", self.co),
    ]
    .into_iter()
    .filter_map(|(label, v)| v.map(|v| (label, v)))
    .collect()
  }
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// A reading that has not been persisted yet. Produced by the
/// [`Aggregator`](crate::aggregator::Aggregator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSnapshot {
  pub location_name: String,
  pub aqi:           Option<u8>,
  /// Degrees Celsius.
  pub temperature:   Option<f64>,
  /// Relative humidity, percent.
  pub humidity:      Option<u8>,
  pub components:    Components,
  pub captured_at:   DateTime<Utc>,
}

impl NewSnapshot {
  /// Attach the identity assigned by the store.
  pub fn with_id(self, id: i64) -> Snapshot {
    Snapshot {
      id,
      location_name: self.location_name,
      aqi:           self.aqi,
      temperature:   self.temperature,
      humidity:      self.humidity,
      components:    self.components,
      captured_at:   self.captured_at,
    }
  }
}

/// A persisted reading. `id` is the store's insertion sequence number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
  pub id:            i64,
  pub location_name: String,
  pub aqi:           Option<u8>,
  pub temperature:   Option<f64>,
  pub humidity:      Option<u8>,
  pub components:    Components,
  pub captured_at:   DateTime<Utc>,
}

impl Snapshot {
  pub fn aqi_level(&self) -> Option<AqiLevel> { self.aqi.and_then(AqiLevel::from_index) }
}
