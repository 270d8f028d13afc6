//! Persistence trait for snapshot backends

use crate::core::error::StorageResult;
use crate::core::model::Snapshot;
use async_trait::async_trait;

/// Backend that stores one whole [`Snapshot`]
///
/// Implementations persist the complete state on every save; there is no
/// partial or incremental write. The [`SnapshotStore`](crate::store::SnapshotStore)
/// serializes all calls, so implementations do not need their own locking
/// across `load` and `save`.
#[async_trait]
pub trait SnapshotPersistence: Send + Sync {
    /// Read the latest persisted snapshot
    ///
    /// Returns `Ok(None)` when nothing has been persisted yet. Malformed data
    /// is a [`StorageError::Corrupted`](crate::core::error::StorageError::Corrupted)
    /// and must never yield a partially filled snapshot.
    async fn load(&self) -> StorageResult<Option<Snapshot>>;

    /// Replace the persisted snapshot
    async fn save(&self, snapshot: &Snapshot) -> StorageResult<()>;

    /// Human-readable location, used in logs
    fn location(&self) -> String;
}
