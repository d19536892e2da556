//! Error types for `airtoday-core`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lookup::LookupStatus;

#[derive(Debug, Error)]
pub enum Error {
  #[error("latitude out of range: {0}")]
  InvalidLatitude(f64),

  #[error("longitude out of range: {0}")]
  InvalidLongitude(f64),

  #[error("unknown air quality index: {0}")]
  UnknownAqi(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─── Lookups ─────────────────────────────────────────────────────────────────

/// Why a single remote lookup produced no value.
///
/// `Clone` so that the status can be reported both in logs and in the
/// [`AcquireError`] handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum LookupError {
  /// The provider answered with a non-success HTTP status.
  #[error("provider returned HTTP {0}")]
  Status(u16),

  /// The request never produced a response (DNS, TLS, timeout, ...).
  #[error("transport error: {0}")]
  Transport(String),

  /// The response body was not the JSON shape we expected.
  #[error("could not decode response: {0}")]
  Decode(String),
}

/// The combined fetch did not yield both a pollution index and a weather
/// reading. Carries the status of each so the caller can say which was
/// missing.
#[derive(Debug, Clone, Error, Serialize)]
#[error("incomplete reading (pollution: {pollution}; weather: {weather})")]
pub struct AcquireError {
  pub pollution: LookupStatus,
  pub weather:   LookupStatus,
}

// ─── Location ────────────────────────────────────────────────────────────────

/// Failure to obtain the device's current coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
  #[error("location permission denied")]
  PermissionDenied,
  #[error("location unavailable")]
  Unavailable,
  #[error("location request timed out")]
  Timeout,
  #[error("location error: {0}")]
  Other(String),
}
