//! Response bodies as OpenWeatherMap sends them, and their conversion into
//! core lookup results.
//!
//! Every field is optional: the provider omits fields freely, and a missing
//! field should degrade to `NotFound`, not to a decode failure.

use airtoday_core::{
  aqi::AqiLevel,
  error::LookupError,
  lookup::{Lookup, Place, Pollution, Weather},
  snapshot::Components,
};
use serde::Deserialize;

// ─── Reverse geocoding ───────────────────────────────────────────────────────

/// One element of the `/geo/1.0/reverse` array.
#[derive(Debug, Deserialize)]
pub struct GeoEntry {
  pub name:    Option<String>,
  pub country: Option<String>,
  pub state:   Option<String>,
}

pub fn place_from(entries: Vec<GeoEntry>) -> Lookup<Place> {
  let Some(first) = entries.into_iter().next() else {
    return Lookup::NotFound;
  };
  match first.name.filter(|n| !n.trim().is_empty()) {
    Some(name) => Lookup::Found(Place { name, country: first.country, state: first.state }),
    None => Lookup::NotFound,
  }
}

// ─── Air pollution ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PollutionResponse {
  #[serde(default)]
  pub list: Vec<PollutionEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PollutionEntry {
  pub main:       Option<PollutionMain>,
  pub components: Option<RawComponents>,
}

#[derive(Debug, Deserialize)]
pub struct PollutionMain {
  pub aqi: Option<i64>,
}

/// Concentrations in µg/m³. `no` and `nh3` are reported but not kept.
#[derive(Debug, Default, Deserialize)]
pub struct RawComponents {
  pub co:    Option<f64>,
  pub no2:   Option<f64>,
  pub o3:    Option<f64>,
  pub so2:   Option<f64>,
  pub pm2_5: Option<f64>,
  pub pm10:  Option<f64>,
}

impl From<RawComponents> for Components {
  fn from(raw: RawComponents) -> Self {
    Self {
      pm2_5: raw.pm2_5,
      pm10:  raw.pm10,
      o3:    raw.o3,
      no2:   raw.no2,
      so2:   raw.so2,
      co:    raw.co,
    }
  }
}

pub fn pollution_from(body: PollutionResponse) -> Lookup<Pollution> {
  let Some(entry) = body.list.into_iter().next() else {
    return Lookup::NotFound;
  };
  let Some(raw_aqi) = entry.main.and_then(|m| m.aqi) else {
    return Lookup::NotFound;
  };
  match AqiLevel::try_from(raw_aqi) {
    Ok(level) => Lookup::Found(Pollution {
      aqi:        level.index(),
      components: entry.components.unwrap_or_default().into(),
    }),
    Err(e) => Lookup::Failed(LookupError::Decode(e.to_string())),
  }
}

// ─── Current weather ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct WeatherResponse {
  pub main: Option<WeatherMain>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WeatherMain {
  /// Celsius when requested with `units=metric`.
  pub temp:     Option<f64>,
  pub humidity: Option<i64>,
}

/// Any well-formed body counts; readings the provider omitted stay `None`.
pub fn weather_from(body: WeatherResponse) -> Lookup<Weather> {
  let main = body.main.unwrap_or_default();
  let humidity = main.humidity.and_then(|h| u8::try_from(h).ok()).filter(|h| *h <= 100);
  Lookup::Found(Weather { temperature: main.temp, humidity })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn geocode_takes_first_entry() {
    let entries: Vec<GeoEntry> = serde_json::from_str(
      r#"[
        {"name":"Lisbon","lat":38.7,"lon":-9.1,"country":"PT","local_names":{"pt":"Lisboa"}},
        {"name":"Elsewhere","country":"ES"}
      ]"#,
    )
    .unwrap();

    let place = place_from(entries).found().unwrap();
    assert_eq!(place.name, "Lisbon");
    assert_eq!(place.country.as_deref(), Some("PT"));
    assert_eq!(place.state, None);
  }

  #[test]
  fn geocode_empty_or_nameless_is_not_found() {
    assert_eq!(place_from(Vec::new()), Lookup::NotFound);

    let entries: Vec<GeoEntry> = serde_json::from_str(r#"[{"country":"BR"}]"#).unwrap();
    assert_eq!(place_from(entries), Lookup::NotFound);
  }

  #[test]
  fn pollution_reads_index_and_components() {
    let body: PollutionResponse = serde_json::from_str(
      r#"{
        "coord": {"lon": -46.63, "lat": -23.55},
        "list": [{
          "main": {"aqi": 3},
          "components": {"co": 201.94, "no": 0.02, "no2": 0.77, "o3": 68.66,
                         "so2": 0.64, "pm2_5": 0.5, "pm10": 0.54, "nh3": 0.12},
          "dt": 1605182400
        }]
      }"#,
    )
    .unwrap();

    let p = pollution_from(body).found().unwrap();
    assert_eq!(p.aqi, 3);
    assert_eq!(p.components.co, Some(201.94));
    assert_eq!(p.components.pm2_5, Some(0.5));
  }

  #[test]
  fn pollution_without_components_still_found() {
    let body: PollutionResponse =
      serde_json::from_str(r#"{"list":[{"main":{"aqi":1}}]}"#).unwrap();
    let p = pollution_from(body).found().unwrap();
    assert_eq!(p.aqi, 1);
    assert!(p.components.is_empty());
  }

  #[test]
  fn pollution_missing_pieces_is_not_found() {
    let empty: PollutionResponse = serde_json::from_str(r#"{"list":[]}"#).unwrap();
    assert_eq!(pollution_from(empty), Lookup::NotFound);

    let absent: PollutionResponse = serde_json::from_str(r#"{}"#).unwrap();
    assert_eq!(pollution_from(absent), Lookup::NotFound);

    let no_main: PollutionResponse =
      serde_json::from_str(r#"{"list":[{"components":{}}]}"#).unwrap();
    assert_eq!(pollution_from(no_main), Lookup::NotFound);
  }

  #[test]
  fn pollution_off_scale_is_a_decode_failure() {
    let body: PollutionResponse =
      serde_json::from_str(r#"{"list":[{"main":{"aqi":9}}]}"#).unwrap();
    assert!(matches!(
      pollution_from(body),
      Lookup::Failed(LookupError::Decode(_))
    ));
  }

  #[test]
  fn weather_reads_temperature_and_humidity() {
    let body: WeatherResponse = serde_json::from_str(
      r#"{"main":{"temp":22.7,"feels_like":22.9,"pressure":1015,"humidity":72},"name":"Recife"}"#,
    )
    .unwrap();
    assert_eq!(
      weather_from(body),
      Lookup::Found(Weather { temperature: Some(22.7), humidity: Some(72) })
    );
  }

  #[test]
  fn weather_tolerates_one_missing_field() {
    let body: WeatherResponse = serde_json::from_str(r#"{"main":{"temp":-3.0}}"#).unwrap();
    assert_eq!(
      weather_from(body),
      Lookup::Found(Weather { temperature: Some(-3.0), humidity: None })
    );
  }

  #[test]
  fn weather_without_readings_is_found_empty() {
    let empty = Lookup::Found(Weather { temperature: None, humidity: None });

    let no_main: WeatherResponse = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
    assert_eq!(weather_from(no_main), empty);

    let empty_main: WeatherResponse = serde_json::from_str(r#"{"main":{}}"#).unwrap();
    assert_eq!(weather_from(empty_main), empty);
  }
}
