//! SQL schema for the AirToday SQLite store.
//!
//! The schema version lives in `PRAGMA user_version`. Older layouts are not
//! migrated: on a version mismatch the table is dropped and recreated, and
//! the history starts over.

/// Version written by [`SCHEMA`]. Bump together with the DDL below.
pub const SCHEMA_VERSION: i64 = 2;

/// Discards a history table of any earlier layout.
pub const DROP_SCHEMA: &str = "
DROP INDEX IF EXISTS snapshots_captured_idx;
DROP TABLE IF EXISTS snapshots;
";

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Append-only. Rows are inserted or bulk-deleted, never updated.
CREATE TABLE IF NOT EXISTS snapshots (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    location_name TEXT    NOT NULL,
    aqi           INTEGER,           -- 1..=5, provider scale
    temperature   REAL,              -- degrees Celsius
    humidity      INTEGER,           -- percent
    pm2_5         REAL,              -- µg/m³
    pm10          REAL,
    o3            REAL,
    no2           REAL,
    so2           REAL,
    co            REAL,
    captured_at   INTEGER NOT NULL   -- ms since Unix epoch
);

CREATE INDEX IF NOT EXISTS snapshots_captured_idx ON snapshots(captured_at);

PRAGMA user_version = 2;
";
