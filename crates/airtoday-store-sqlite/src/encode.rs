//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Capture times are stored as integer milliseconds since the Unix epoch.
//! Small integers (AQI, humidity) are stored as `INTEGER` and range-checked
//! on the way back out.

use airtoday_core::snapshot::{Components, Snapshot};
use chrono::{DateTime, Utc};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_ms(dt: DateTime<Utc>) -> i64 { dt.timestamp_millis() }

pub fn decode_ms(ms: i64) -> Result<DateTime<Utc>> {
  DateTime::from_timestamp_millis(ms).ok_or(Error::Timestamp(ms))
}

// ─── Small integers ──────────────────────────────────────────────────────────

fn decode_u8(column: &'static str, value: Option<i64>) -> Result<Option<u8>> {
  value
    .map(|v| u8::try_from(v).map_err(|_| Error::OutOfRange { column, value: v }))
    .transpose()
}

// ─── Row ─────────────────────────────────────────────────────────────────────

/// Intermediate row representation read directly from SQLite.
pub struct RawSnapshot {
  pub id:            i64,
  pub location_name: String,
  pub aqi:           Option<i64>,
  pub temperature:   Option<f64>,
  pub humidity:      Option<i64>,
  pub pm2_5:         Option<f64>,
  pub pm10:          Option<f64>,
  pub o3:            Option<f64>,
  pub no2:           Option<f64>,
  pub so2:           Option<f64>,
  pub co:            Option<f64>,
  pub captured_at:   i64,
}

/// Column list matching [`RawSnapshot::from_row`].
pub const SNAPSHOT_COLUMNS: &str = "id, location_name, aqi, temperature, humidity, \
                                    pm2_5, pm10, o3, no2, so2, co, captured_at";

impl RawSnapshot {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      location_name: row.get(1)?,
      aqi:           row.get(2)?,
      temperature:   row.get(3)?,
      humidity:      row.get(4)?,
      pm2_5:         row.get(5)?,
      pm10:          row.get(6)?,
      o3:            row.get(7)?,
      no2:           row.get(8)?,
      so2:           row.get(9)?,
      co:            row.get(10)?,
      captured_at:   row.get(11)?,
    })
  }

  pub fn into_snapshot(self) -> Result<Snapshot> {
    Ok(Snapshot {
      id:            self.id,
      location_name: self.location_name,
      aqi:           decode_u8("aqi", self.aqi)?,
      temperature:   self.temperature,
      humidity:      decode_u8("humidity", self.humidity)?,
      components:    Components {
        pm2_5: self.pm2_5,
        pm10:  self.pm10,
        o3:    self.o3,
        no2:   self.no2,
        so2:   self.so2,
        co:    self.co,
      },
      captured_at:   decode_ms(self.captured_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;

  use super::*;

  #[test]
  fn millis_preserve_sub_second_precision() {
    let dt = Utc.timestamp_millis_opt(1_715_000_123_456).unwrap();
    assert_eq!(decode_ms(encode_ms(dt)).unwrap(), dt);
  }

  #[test]
  fn out_of_range_small_ints_are_rejected() {
    assert!(matches!(
      decode_u8("humidity", Some(300)),
      Err(Error::OutOfRange { column: "humidity", value: 300 })
    ));
    assert_eq!(decode_u8("aqi", None).unwrap(), None);
    assert_eq!(decode_u8("aqi", Some(5)).unwrap(), Some(5));
  }
}
