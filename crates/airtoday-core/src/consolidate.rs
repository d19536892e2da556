//! Day consolidation of the history for display.
//!
//! Never persisted; recomputed from the full history every time it is shown.

use std::collections::HashMap;

use chrono::{DateTime, Datelike as _, TimeDelta, TimeZone, Utc};

use crate::snapshot::Snapshot;

/// How far back the consolidated history looks by default.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 5;

/// Keep one reading per calendar day within `window` of `now`.
///
/// Rows captured before `now - window` are dropped; a window reaching past
/// the representable range keeps every row. The remaining rows are
/// bucketed by (year, day of year) in `tz`, the latest reading of each day is
/// kept, and the result is ordered newest first.
pub fn consolidate_by_day<Tz: TimeZone>(
  history: impl IntoIterator<Item = Snapshot>,
  now: DateTime<Utc>,
  window: TimeDelta,
  tz: &Tz,
) -> Vec<Snapshot> {
  let cutoff = now.checked_sub_signed(window);
  let mut latest: HashMap<(i32, u32), Snapshot> = HashMap::new();

  let in_window = |s: &Snapshot| cutoff.is_none_or(|c| s.captured_at >= c);
  for snapshot in history.into_iter().filter(in_window) {
    let local = snapshot.captured_at.with_timezone(tz);
    let day   = (local.year(), local.ordinal());
    match latest.get(&day) {
      Some(kept) if kept.captured_at >= snapshot.captured_at => {}
      _ => {
        latest.insert(day, snapshot);
      }
    }
  }

  let mut days: Vec<Snapshot> = latest.into_values().collect();
  days.sort_by(|a, b| b.captured_at.cmp(&a.captured_at).then(b.id.cmp(&a.id)));
  days
}

#[cfg(test)]
mod tests {
  use chrono::{FixedOffset, TimeZone as _};

  use super::*;
  use crate::snapshot::Components;

  fn at(id: i64, captured_at: DateTime<Utc>) -> Snapshot {
    Snapshot {
      id,
      location_name: "Lisbon".into(),
      aqi: Some(2),
      temperature: Some(18.0),
      humidity: Some(70),
      components: Components::default(),
      captured_at,
    }
  }

  fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
  }

  fn window() -> TimeDelta { TimeDelta::days(DEFAULT_LOOKBACK_DAYS) }

  #[test]
  fn keeps_latest_reading_per_day() {
    let rows = vec![
      at(3, utc(2024, 5, 11, 8)),
      at(2, utc(2024, 5, 10, 18)),
      at(1, utc(2024, 5, 10, 9)),
    ];

    let out = consolidate_by_day(rows, utc(2024, 5, 11, 12), window(), &Utc);
    let ids: Vec<i64> = out.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![3, 2]);
  }

  #[test]
  fn input_order_does_not_matter() {
    let rows = vec![
      at(1, utc(2024, 5, 10, 9)),
      at(3, utc(2024, 5, 11, 8)),
      at(2, utc(2024, 5, 10, 18)),
    ];

    let out = consolidate_by_day(rows, utc(2024, 5, 11, 12), window(), &Utc);
    let ids: Vec<i64> = out.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![3, 2]);
  }

  #[test]
  fn drops_rows_older_than_window() {
    let now = utc(2024, 5, 20, 12);
    let rows = vec![
      at(4, utc(2024, 5, 20, 6)),
      at(3, utc(2024, 5, 15, 12)),
      at(2, utc(2024, 5, 15, 11)),
      at(1, utc(2024, 5, 1, 12)),
    ];

    let out = consolidate_by_day(rows, now, window(), &Utc);
    let ids: Vec<i64> = out.iter().map(|s| s.id).collect();
    // The cutoff itself (15th, 12:00) is inclusive.
    assert_eq!(ids, vec![4, 3]);
  }

  #[test]
  fn empty_history_stays_empty() {
    let out = consolidate_by_day(Vec::new(), utc(2024, 1, 1, 0), window(), &Utc);
    assert!(out.is_empty());
  }

  #[test]
  fn huge_window_keeps_everything() {
    let rows = vec![at(2, utc(2024, 5, 11, 8)), at(1, utc(1970, 1, 1, 0))];
    let out = consolidate_by_day(rows, utc(2024, 5, 11, 12), TimeDelta::days(100_000_000), &Utc);
    let ids: Vec<i64> = out.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![2, 1]);

    let out = consolidate_by_day(Vec::new(), Utc::now(), TimeDelta::MAX, &Utc);
    assert!(out.is_empty());
  }

  #[test]
  fn days_split_on_year_boundary() {
    let rows = vec![at(2, utc(2025, 1, 1, 1)), at(1, utc(2024, 12, 31, 23))];
    let out = consolidate_by_day(rows, utc(2025, 1, 1, 2), window(), &Utc);
    assert_eq!(out.len(), 2);
  }

  #[test]
  fn buckets_follow_the_given_time_zone() {
    // 23:00 and 01:00 UTC straddle midnight in UTC, but both fall on the
    // same afternoon/evening in UTC-03:00.
    let brt = FixedOffset::west_opt(3 * 3600).unwrap();
    let rows = vec![at(2, utc(2024, 5, 11, 1)), at(1, utc(2024, 5, 10, 23))];

    let in_utc = consolidate_by_day(rows.clone(), utc(2024, 5, 11, 2), window(), &Utc);
    assert_eq!(in_utc.len(), 2);

    let in_brt = consolidate_by_day(rows, utc(2024, 5, 11, 2), window(), &brt);
    assert_eq!(in_brt.len(), 1);
    assert_eq!(in_brt[0].id, 2);
  }

  #[test]
  fn equal_capture_times_keep_first_seen() {
    let t = utc(2024, 5, 10, 9);
    let out = consolidate_by_day(vec![at(7, t), at(6, t)], utc(2024, 5, 10, 10), window(), &Utc);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, 7);
  }
}
