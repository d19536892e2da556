//! The provider's categorical air quality scale.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

use crate::Error;

/// Air Quality Index on the 1–5 scale used by OpenWeatherMap.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AqiLevel {
  Good,
  Fair,
  Moderate,
  Poor,
  VeryPoor,
}

impl AqiLevel {
  pub fn from_index(index: u8) -> Option<Self> {
    match index {
      1 => Some(Self::Good),
      2 => Some(Self::Fair),
      3 => Some(Self::Moderate),
      4 => Some(Self::Poor),
      5 => Some(Self::VeryPoor),
      _ => None,
    }
  }

  pub fn index(self) -> u8 {
    match self {
      Self::Good => 1,
      Self::Fair => 2,
      Self::Moderate => 3,
      Self::Poor => 4,
      Self::VeryPoor => 5,
    }
  }

  /// Human-readable label, e.g. "Very Poor".
  pub fn label(self) -> &'static str {
    match self {
      Self::Good => "Good",
      Self::Fair => "Fair",
      Self::Moderate => "Moderate",
      Self::Poor => "Poor",
      Self::VeryPoor => "Very Poor",
    }
  }

  /// One-line health advisory for the level.
  pub fn advisory(self) -> &'static str {
    match self {
      Self::Good => "Air quality is satisfactory; enjoy outdoor activities.",
      Self::Fair => "Acceptable; unusually sensitive people should limit prolonged exertion.",
      Self::Moderate => "Sensitive groups may feel effects; consider shorter outdoor sessions.",
      Self::Poor => "Everyone may feel effects; reduce outdoor exertion and keep windows closed.",
      Self::VeryPoor => "Health alert: stay indoors where possible and wear an N95 mask outside.",
    }
  }

  /// Display colour name used by renderers.
  pub fn colour(self) -> &'static str {
    match self {
      Self::Good => "green",
      Self::Fair => "yellow",
      Self::Moderate => "orange",
      Self::Poor => "red",
      Self::VeryPoor => "purple",
    }
  }
}

impl TryFrom<i64> for AqiLevel {
  type Error = Error;

  fn try_from(raw: i64) -> Result<Self, Self::Error> {
    u8::try_from(raw)
      .ok()
      .and_then(Self::from_index)
      .ok_or(Error::UnknownAqi(raw))
  }
}
