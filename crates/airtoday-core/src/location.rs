//! Single-shot location requests.

use std::{future::Future, time::Duration};

use crate::{error::LocationError, snapshot::Coordinates};

/// Something that can report the current position once per request.
pub trait LocationSource: Send + Sync {
  fn locate(&self) -> impl Future<Output = Result<Coordinates, LocationError>> + Send + '_;
}

/// Ask `source` for a position, giving up after `timeout`.
pub async fn locate_within<L: LocationSource>(
  source: &L,
  timeout: Duration,
) -> Result<Coordinates, LocationError> {
  match tokio::time::timeout(timeout, source.locate()).await {
    Ok(result) => result,
    Err(_) => {
      tracing::warn!(?timeout, "location request timed out");
      Err(LocationError::Timeout)
    }
  }
}

/// A location source pinned to configured coordinates.
///
/// Yields [`LocationError::Unavailable`] when nothing was configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation(Option<Coordinates>);

impl FixedLocation {
  pub fn new(at: Option<Coordinates>) -> Self { Self(at) }
}

impl LocationSource for FixedLocation {
  async fn locate(&self) -> Result<Coordinates, LocationError> {
    self.0.ok_or(LocationError::Unavailable)
  }
}
