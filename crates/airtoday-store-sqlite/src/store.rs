//! [`SqliteStore`] — the SQLite implementation of [`HistoryStore`].

use std::path::Path;

use airtoday_core::{
  snapshot::{NewSnapshot, Snapshot},
  store::HistoryStore,
};

use crate::{
  Error, Result,
  encode::{RawSnapshot, SNAPSHOT_COLUMNS, encode_ms},
  schema::{DROP_SCHEMA, SCHEMA, SCHEMA_VERSION},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A reading history backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Create the schema, first dropping any table left by a different schema
  /// version. A fresh database reports version 0 and is created as-is.
  async fn init_schema(&self) -> Result<()> {
    let (found, recreated) = self
      .conn
      .call(|conn| {
        let found: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
        let recreate = found != 0 && found != SCHEMA_VERSION;
        if recreate {
          conn.execute_batch(DROP_SCHEMA)?;
        }
        conn.execute_batch(SCHEMA)?;
        Ok((found, recreate))
      })
      .await?;

    if recreated {
      tracing::warn!(
        found,
        expected = SCHEMA_VERSION,
        "history schema changed; previous readings were discarded"
      );
    }
    Ok(())
  }
}

// ─── HistoryStore impl ───────────────────────────────────────────────────────

impl HistoryStore for SqliteStore {
  type Error = Error;

  async fn insert(&self, snapshot: NewSnapshot) -> Result<Snapshot> {
    let name        = snapshot.location_name.clone();
    let aqi         = snapshot.aqi;
    let temperature = snapshot.temperature;
    let humidity    = snapshot.humidity;
    let c           = snapshot.components;
    let captured_ms = encode_ms(snapshot.captured_at);

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO snapshots (
             location_name, aqi, temperature, humidity,
             pm2_5, pm10, o3, no2, so2, co, captured_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            name,
            aqi,
            temperature,
            humidity,
            c.pm2_5,
            c.pm10,
            c.o3,
            c.no2,
            c.so2,
            c.co,
            captured_ms,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(id, "snapshot stored");
    Ok(snapshot.with_id(id))
  }

  async fn list_all(&self) -> Result<Vec<Snapshot>> {
    let raws: Vec<RawSnapshot> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SNAPSHOT_COLUMNS} FROM snapshots ORDER BY captured_at DESC, id DESC"
        ))?;
        let rows = stmt
          .query_map([], RawSnapshot::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSnapshot::into_snapshot).collect()
  }

  async fn clear(&self) -> Result<u64> {
    let removed = self
      .conn
      .call(|conn| Ok(conn.execute("DELETE FROM snapshots", [])?))
      .await?;

    tracing::debug!(removed, "history cleared");
    Ok(removed as u64)
  }
}
