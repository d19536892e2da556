//! OpenWeatherMap implementation of [`airtoday_core::lookup::AirDataSource`].
//!
//! Three endpoints are used, all authenticated with an `appid` query
//! parameter:
//!
//! - `GET /geo/1.0/reverse` for the place name,
//! - `GET /data/2.5/air_pollution` for the pollution index,
//! - `GET /data/2.5/weather` for temperature and humidity.

mod client;
mod wire;

pub mod error;

pub use client::{DEFAULT_BASE_URL, OpenWeatherClient, OpenWeatherConfig, http_client};
pub use error::{Error, Result};
