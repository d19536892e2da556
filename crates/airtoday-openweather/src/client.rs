//! Async HTTP client for the OpenWeatherMap lookups.

use std::time::Duration;

use airtoday_core::{
  error::LookupError,
  lookup::{AirDataSource, Lookup, Place, Pollution, Weather},
  snapshot::Coordinates,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
  Error, Result,
  wire::{GeoEntry, PollutionResponse, WeatherResponse, place_from, pollution_from, weather_from},
};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const USER_AGENT: &str = concat!("airtoday/", env!("CARGO_PKG_VERSION"));

/// Build the shared HTTP client. One client is created at start-up and handed
/// to every component that talks HTTP.
pub fn http_client(timeout: Duration) -> Result<Client> {
  Ok(
    Client::builder()
      .timeout(timeout)
      .user_agent(USER_AGENT)
      .build()?,
  )
}

/// Connection settings for OpenWeatherMap.
#[derive(Debug, Clone)]
pub struct OpenWeatherConfig {
  pub base_url: String,
  pub api_key:  String,
}

impl OpenWeatherConfig {
  pub fn new(api_key: impl Into<String>) -> Self {
    Self { base_url: DEFAULT_BASE_URL.to_owned(), api_key: api_key.into() }
  }
}

/// The three OpenWeatherMap lookups behind [`AirDataSource`].
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct OpenWeatherClient {
  client: Client,
  config: OpenWeatherConfig,
}

impl OpenWeatherClient {
  pub fn new(client: Client, config: OpenWeatherConfig) -> Result<Self> {
    if config.api_key.trim().is_empty() {
      return Err(Error::MissingApiKey);
    }
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// `GET <path>?lat=..&lon=..&<extra>&appid=..`, decoded as `T`.
  async fn get_json<T: DeserializeOwned>(
    &self,
    path: &str,
    at: Coordinates,
    extra: &[(&str, &str)],
  ) -> Result<T, LookupError> {
    let resp = self
      .client
      .get(self.url(path))
      .query(&[("lat", at.latitude.to_string()), ("lon", at.longitude.to_string())])
      .query(extra)
      .query(&[("appid", self.config.api_key.as_str())])
      .send()
      .await
      // Strip the URL: it carries the API key.
      .map_err(|e| LookupError::Transport(e.without_url().to_string()))?;

    let status = resp.status();
    if !status.is_success() {
      tracing::debug!(path, %status, "lookup rejected");
      return Err(LookupError::Status(status.as_u16()));
    }

    let body = resp
      .text()
      .await
      .map_err(|e| LookupError::Transport(e.without_url().to_string()))?;
    serde_json::from_str(&body).map_err(|e| LookupError::Decode(e.to_string()))
  }
}

fn settle<T, U>(result: Result<T, LookupError>, convert: impl FnOnce(T) -> Lookup<U>) -> Lookup<U> {
  match result {
    Ok(body) => convert(body),
    Err(e) => Lookup::Failed(e),
  }
}

// ─── AirDataSource impl ──────────────────────────────────────────────────────

impl AirDataSource for OpenWeatherClient {
  async fn reverse_geocode(&self, at: Coordinates) -> Lookup<Place> {
    let body = self
      .get_json::<Vec<GeoEntry>>("/geo/1.0/reverse", at, &[("limit", "1")])
      .await;
    settle(body, place_from)
  }

  async fn air_pollution(&self, at: Coordinates) -> Lookup<Pollution> {
    let body = self
      .get_json::<PollutionResponse>("/data/2.5/air_pollution", at, &[])
      .await;
    settle(body, pollution_from)
  }

  async fn current_weather(&self, at: Coordinates) -> Lookup<Weather> {
    let body = self
      .get_json::<WeatherResponse>("/data/2.5/weather", at, &[("units", "metric")])
      .await;
    settle(body, weather_from)
  }
}
