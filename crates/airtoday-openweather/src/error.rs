//! Error type for `airtoday-openweather`.
//!
//! Only construction can fail with this type; individual lookups report
//! through [`airtoday_core::lookup::Lookup`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("an OpenWeatherMap API key is required")]
  MissingApiKey,

  #[error("failed to build HTTP client: {0}")]
  Http(#[from] reqwest::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
