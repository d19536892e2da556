//! Air quality across a fixed set of world capitals.

use serde::Serialize;

use crate::{
  aggregator::{Acquisition, Aggregator},
  error::AcquireError,
  lookup::AirDataSource,
  snapshot::Coordinates,
};

/// A named place with known coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorldCity {
  pub name:        &'static str,
  pub coordinates: Coordinates,
}

const fn city(name: &'static str, latitude: f64, longitude: f64) -> WorldCity {
  WorldCity { name, coordinates: Coordinates { latitude, longitude } }
}

pub const WORLD_CAPITALS: &[WorldCity] = &[
  city("New York", 40.7128, -74.0060),
  city("London", 51.5074, -0.1278),
  city("Tokyo", 35.6895, 139.6917),
  city("Brasília", -15.7939, -47.8828),
  city("Paris", 48.8566, 2.3522),
];

/// One city's result in a survey.
#[derive(Debug)]
pub struct WorldReading {
  pub city:   WorldCity,
  pub result: Result<Acquisition, AcquireError>,
}

/// Acquire a reading for each city in order. A failure for one city does not
/// stop the others. Nothing is persisted.
pub async fn survey<S: AirDataSource>(
  aggregator: &Aggregator<S>,
  cities: &[WorldCity],
) -> Vec<WorldReading> {
  let mut readings = Vec::with_capacity(cities.len());
  for &city in cities {
    let result = aggregator.acquire(city.coordinates).await;
    if let Err(e) = &result {
      tracing::warn!(city = city.name, error = %e, "no reading for city");
    }
    readings.push(WorldReading { city, result });
  }
  readings
}
