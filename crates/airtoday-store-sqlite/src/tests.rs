//! Integration tests for `SqliteStore` against in-memory and on-disk databases.

use airtoday_core::{
  snapshot::{Components, NewSnapshot},
  store::HistoryStore,
};
use chrono::{DateTime, TimeDelta, TimeZone as _, Utc};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn reading(name: &str, captured_at: DateTime<Utc>) -> NewSnapshot {
  NewSnapshot {
    location_name: name.into(),
    aqi: Some(2),
    temperature: Some(21.4),
    humidity: Some(63),
    components: Components::default(),
    captured_at,
  }
}

fn t0() -> DateTime<Utc> { Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap() }

// ─── Insert ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_assigns_increasing_ids() {
  let s = store().await;

  let a = s.insert(reading("Recife", t0())).await.unwrap();
  let b = s.insert(reading("Recife", t0())).await.unwrap();
  assert!(b.id > a.id);
}

#[tokio::test]
async fn insert_then_list_returns_it_first() {
  let s = store().await;
  s.insert(reading("Porto", t0())).await.unwrap();

  let newest = s
    .insert(reading("Lisbon", t0() + TimeDelta::hours(2)))
    .await
    .unwrap();

  let all = s.list_all().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0], newest);
}

#[tokio::test]
async fn every_field_survives_storage() {
  let s = store().await;
  let input = NewSnapshot {
    location_name: "Curitiba".into(),
    aqi: Some(5),
    temperature: Some(-1.25),
    humidity: Some(100),
    components: Components {
      pm2_5: Some(55.2),
      pm10:  Some(80.0),
      o3:    Some(12.1),
      no2:   Some(30.4),
      so2:   Some(2.2),
      co:    Some(400.5),
    },
    captured_at: Utc.timestamp_millis_opt(1_717_233_000_789).unwrap(),
  };

  let stored = s.insert(input.clone()).await.unwrap();
  let listed = s.list_all().await.unwrap();

  assert_eq!(listed, vec![stored.clone()]);
  assert_eq!(stored.location_name, input.location_name);
  assert_eq!(stored.components, input.components);
  assert_eq!(stored.captured_at, input.captured_at);
}

#[tokio::test]
async fn absent_values_round_trip_as_none() {
  let s = store().await;
  let input = NewSnapshot {
    aqi: None,
    temperature: None,
    humidity: None,
    ..reading("Manaus", t0())
  };
  s.insert(input).await.unwrap();

  let got = &s.list_all().await.unwrap()[0];
  assert_eq!(got.aqi, None);
  assert_eq!(got.temperature, None);
  assert_eq!(got.humidity, None);
  assert!(got.components.is_empty());
}

// ─── Ordering ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_orders_by_capture_time_not_insertion() {
  let s = store().await;
  s.insert(reading("mid", t0())).await.unwrap();
  s.insert(reading("old", t0() - TimeDelta::days(1))).await.unwrap();
  s.insert(reading("new", t0() + TimeDelta::days(1))).await.unwrap();

  let names: Vec<String> = s
    .list_all()
    .await
    .unwrap()
    .into_iter()
    .map(|r| r.location_name)
    .collect();
  assert_eq!(names, vec!["new", "mid", "old"]);
}

#[tokio::test]
async fn equal_capture_times_list_latest_insert_first() {
  let s = store().await;
  let first = s.insert(reading("a", t0())).await.unwrap();
  let second = s.insert(reading("b", t0())).await.unwrap();

  let ids: Vec<i64> = s.list_all().await.unwrap().iter().map(|r| r.id).collect();
  assert_eq!(ids, vec![second.id, first.id]);
}

// ─── Clear ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn clear_removes_everything() {
  let s = store().await;
  for i in 0..3 {
    s.insert(reading("Belém", t0() + TimeDelta::minutes(i)))
      .await
      .unwrap();
  }

  assert_eq!(s.clear().await.unwrap(), 3);
  assert!(s.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn clear_on_empty_store_is_a_no_op() {
  let s = store().await;
  assert_eq!(s.clear().await.unwrap(), 0);
  assert!(s.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn ids_keep_increasing_after_clear() {
  let s = store().await;
  let before = s.insert(reading("x", t0())).await.unwrap();
  s.clear().await.unwrap();
  let after = s.insert(reading("y", t0())).await.unwrap();
  assert!(after.id > before.id);
}

// ─── Schema versions ─────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_current_schema_keeps_rows() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("history.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.insert(reading("Natal", t0())).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn older_schema_is_recreated_destructively() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("history.db");

  {
    let old = rusqlite::Connection::open(&path).unwrap();
    old
      .execute_batch(
        "CREATE TABLE snapshots (
           id INTEGER PRIMARY KEY AUTOINCREMENT,
           city TEXT NOT NULL,
           aqi INTEGER NOT NULL,
           temperature REAL,
           humidity INTEGER,
           timestamp INTEGER NOT NULL
         );
         INSERT INTO snapshots (city, aqi, timestamp) VALUES ('Salvador', 3, 0);
         PRAGMA user_version = 1;",
      )
      .unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert!(s.list_all().await.unwrap().is_empty());

  // The new layout is in place.
  let stored = s.insert(reading("Salvador", t0())).await.unwrap();
  assert_eq!(s.list_all().await.unwrap(), vec![stored]);
}
