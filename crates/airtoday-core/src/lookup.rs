//! Remote lookups and the [`AirDataSource`] trait.
//!
//! Each lookup resolves to a [`Lookup`], which keeps "the provider had nothing
//! for this coordinate" apart from "the request failed". Implementations never
//! fall back to placeholder values themselves; that is the aggregator's call.

use std::{fmt, future::Future};

use serde::{Deserialize, Serialize};

use crate::{error::LookupError, snapshot::{Components, Coordinates}};

// ─── Results ─────────────────────────────────────────────────────────────────

/// Outcome of a single remote lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
  Found(T),
  /// The provider answered successfully but had no usable data.
  NotFound,
  Failed(LookupError),
}

impl<T> Lookup<T> {
  pub fn found(self) -> Option<T> {
    match self {
      Self::Found(v) => Some(v),
      _ => None,
    }
  }

  /// The outcome with the payload discarded.
  pub fn status(&self) -> LookupStatus {
    match self {
      Self::Found(_) => LookupStatus::Found,
      Self::NotFound => LookupStatus::NotFound,
      Self::Failed(e) => LookupStatus::Failed(e.clone()),
    }
  }
}

/// A [`Lookup`] without its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum LookupStatus {
  Found,
  NotFound,
  Failed(LookupError),
}

impl fmt::Display for LookupStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Found => f.write_str("ok"),
      Self::NotFound => f.write_str("no data"),
      Self::Failed(e) => write!(f, "{e}"),
    }
  }
}

// ─── Payloads ────────────────────────────────────────────────────────────────

/// A reverse-geocoded place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
  pub name:    String,
  /// ISO 3166 alpha-2 country code, when the provider reports one.
  pub country: Option<String>,
  pub state:   Option<String>,
}

/// The pollution index and, when available, per-pollutant concentrations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pollution {
  pub aqi:        u8,
  pub components: Components,
}

/// Current conditions. Either field may be absent in the provider's body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weather {
  /// Degrees Celsius.
  pub temperature: Option<f64>,
  pub humidity:    Option<u8>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// The three remote lookups an acquisition is built from.
///
/// Lookups are independent of one another and may run concurrently.
pub trait AirDataSource: Send + Sync {
  /// Coordinate → human-readable place.
  fn reverse_geocode(
    &self,
    at: Coordinates,
  ) -> impl Future<Output = Lookup<Place>> + Send + '_;

  /// Coordinate → categorical pollution index (1–5).
  fn air_pollution(
    &self,
    at: Coordinates,
  ) -> impl Future<Output = Lookup<Pollution>> + Send + '_;

  /// Coordinate → temperature and humidity.
  fn current_weather(
    &self,
    at: Coordinates,
  ) -> impl Future<Output = Lookup<Weather>> + Send + '_;
}
