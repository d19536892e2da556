//! Plain-text rendering of readings for the terminal.

use std::fmt::Display;

use airtoday_core::{
  aggregator::Acquisition,
  aqi::AqiLevel,
  lookup::LookupStatus,
  snapshot::{Components, NewSnapshot, Snapshot},
  tips::TipSection,
  world::WorldReading,
};
use chrono::{DateTime, TimeZone};

const DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// The fields of a reading that every view shows.
pub struct Card<'a> {
  pub location:    &'a str,
  pub aqi:         Option<u8>,
  pub temperature: Option<f64>,
  pub humidity:    Option<u8>,
  pub components:  &'a Components,
}

impl<'a> From<&'a NewSnapshot> for Card<'a> {
  fn from(s: &'a NewSnapshot) -> Self {
    Self {
      location:    &s.location_name,
      aqi:         s.aqi,
      temperature: s.temperature,
      humidity:    s.humidity,
      components:  &s.components,
    }
  }
}

impl<'a> From<&'a Snapshot> for Card<'a> {
  fn from(s: &'a Snapshot) -> Self {
    Self {
      location:    &s.location_name,
      aqi:         s.aqi,
      temperature: s.temperature,
      humidity:    s.humidity,
      components:  &s.components,
    }
  }
}

pub fn aqi_line(aqi: Option<u8>) -> String {
  match aqi {
    Some(i) => match AqiLevel::from_index(i) {
      Some(level) => format!("AQI {i} · {} ({})", level.label(), level.colour()),
      None => format!("AQI {i}"),
    },
    None => "AQI unavailable".to_owned(),
  }
}

/// Join display lines, each terminated by a newline.
fn block(lines: Vec<String>) -> String {
  let mut out = lines.join("\n");
  out.push('\n');
  out
}

fn card_lines<Tz>(card: &Card<'_>, when: &DateTime<Tz>) -> Vec<String>
where
  Tz: TimeZone,
  Tz::Offset: Display,
{
  let mut lines = vec![
    card.location.to_owned(),
    format!("  {}", aqi_line(card.aqi)),
    format!("  Date: {}", when.format(DATE_FORMAT)),
  ];
  if let Some(t) = card.temperature {
    lines.push(format!("  Temperature: {t:.1} °C"));
  }
  if let Some(h) = card.humidity {
    lines.push(format!("  Humidity: {h}%"));
  }
  let parts: Vec<String> = card
    .components
    .present()
    .into_iter()
    .map(|(label, v)| format!("{label} {v:.1}"))
    .collect();
  if !parts.is_empty() {
    lines.push(format!("  Pollutants (µg/m³): {}", parts.join(", ")));
  }
  lines
}

pub fn card<Tz>(card: &Card<'_>, when: &DateTime<Tz>) -> String
where
  Tz: TimeZone,
  Tz::Offset: Display,
{
  block(card_lines(card, when))
}

/// Dashboard view of a fresh acquisition.
pub fn acquisition<Tz>(acq: &Acquisition, tz: &Tz) -> String
where
  Tz: TimeZone,
  Tz::Offset: Display,
{
  let snapshot = &acq.snapshot;
  let mut lines = card_lines(&Card::from(snapshot), &snapshot.captured_at.with_timezone(tz));
  if let Some(level) = snapshot.aqi.and_then(AqiLevel::from_index) {
    lines.push(format!("  {}", level.advisory()));
  }
  if let LookupStatus::Failed(e) = &acq.place {
    lines.push(format!("  (place name unavailable: {e})"));
  }
  block(lines)
}

/// History view: one card per row, or a notice when empty.
pub fn history<Tz>(rows: &[Snapshot], tz: &Tz) -> String
where
  Tz: TimeZone,
  Tz::Offset: Display,
{
  if rows.is_empty() {
    return "No readings recorded yet.\n".to_owned();
  }
  rows
    .iter()
    .map(|r| card(&Card::from(r), &r.captured_at.with_timezone(tz)))
    .collect::<Vec<_>>()
    .join("\n")
}

/// World view: one card per city; failures get a single line.
pub fn world<Tz>(readings: &[WorldReading], tz: &Tz) -> String
where
  Tz: TimeZone,
  Tz::Offset: Display,
{
  readings
    .iter()
    .map(|r| match &r.result {
      Ok(acq) => {
        // The city label is authoritative; geocoded names vary by district.
        let c = Card { location: r.city.name, ..Card::from(&acq.snapshot) };
        card(&c, &acq.snapshot.captured_at.with_timezone(tz))
      }
      Err(e) => format!("{}\n  Error loading data: {e}\n", r.city.name),
    })
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn tips(sections: &[TipSection], emergency: &str) -> String {
  let mut lines = Vec::new();
  for section in sections {
    lines.push(format!("{}:", section.title));
    lines.extend(section.tips.iter().map(|tip| format!("  • {tip}")));
    lines.push(String::new());
  }
  lines.push(format!("Emergency number: {emergency}"));
  block(lines)
}
