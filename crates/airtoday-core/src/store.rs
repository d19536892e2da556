//! The `HistoryStore` trait.
//!
//! Implemented by storage backends (e.g. `airtoday-store-sqlite`). The CLI
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::snapshot::{NewSnapshot, Snapshot};

/// An append-only history of readings.
///
/// Rows are never updated. The only way to remove a row is [`clear`], which
/// removes all of them.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
///
/// [`clear`]: HistoryStore::clear
pub trait HistoryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a reading and return it with its assigned identity.
  fn insert(
    &self,
    snapshot: NewSnapshot,
  ) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send + '_;

  /// Every stored reading, newest capture time first. Readings with equal
  /// capture times are ordered by descending identity.
  fn list_all(&self) -> impl Future<Output = Result<Vec<Snapshot>, Self::Error>> + Send + '_;

  /// Delete every reading. Returns the number of rows removed.
  fn clear(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
