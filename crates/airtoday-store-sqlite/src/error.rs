//! Error type for `airtoday-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("timestamp out of range: {0} ms")]
  Timestamp(i64),

  /// A stored integer does not fit the domain type of its column.
  #[error("value {value} out of range for column {column}")]
  OutOfRange { column: &'static str, value: i64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
