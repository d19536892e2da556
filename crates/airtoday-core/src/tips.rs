//! Static health advice and emergency numbers.

use serde::Serialize;

/// Used when the country is unknown or not in [`emergency_number`]'s table.
pub const DEFAULT_EMERGENCY_NUMBER: &str = "112";

/// A titled group of tips.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TipSection {
  pub title: &'static str,
  pub tips:  &'static [&'static str],
}

pub const GENERAL_TIPS: &[TipSection] = &[
  TipSection {
    title: "How to stay safe during poor air quality",
    tips:  &[
      "Check the AQI daily before planning outdoor activities.",
      "Keep windows and doors closed when pollution is high.",
      "Use an air purifier indoors if possible.",
      "Stay hydrated and maintain a healthy diet.",
      "Consider wearing an N95 mask if AQI is Very Poor.",
    ],
  },
  TipSection {
    title: "Eco-friendly habits",
    tips:  &[
      "Use public transport or carpool to reduce emissions.",
      "Turn off lights and electronics when not in use.",
      "Recycle and dispose of waste responsibly.",
      "Plant trees or maintain indoor plants to help purify the air.",
      "Avoid burning trash or leaves, which contributes to air pollution.",
    ],
  },
  TipSection {
    title: "Tips for sensitive groups",
    tips:  &[
      "Children, the elderly, and people with respiratory issues should limit outdoor exposure on high-AQI days.",
      "Keep medications such as inhalers easily accessible.",
      "Consult your doctor for guidance specific to your condition.",
    ],
  },
  TipSection {
    title: "When to seek medical help",
    tips:  &[
      "If you experience shortness of breath, wheezing, or severe coughing.",
      "If you have chest pain or tightness that does not improve.",
      "If your symptoms worsen despite taking usual medications.",
    ],
  },
];

/// The emergency telephone number for an ISO 3166 alpha-2 country code.
pub fn emergency_number(country: Option<&str>) -> &'static str {
  let Some(code) = country else {
    return DEFAULT_EMERGENCY_NUMBER;
  };
  match code.trim().to_ascii_uppercase().as_str() {
    "BR" => "192",
    "US" => "911",
    "GB" => "999",
    "FR" | "ES" | "PT" => "112",
    _ => DEFAULT_EMERGENCY_NUMBER,
  }
}
