//! Scoped access to the snapshot

use crate::core::SnapshotPersistence;
use crate::core::error::StoreResult;
use crate::core::model::{Inventory, Orders, Snapshot};
use std::fmt;
use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;

/// How a context may be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Releasing never persists; mutations are discarded
    ReadOnly,
    /// Releasing persists the snapshot, then commits it to memory
    ReadWrite,
}

/// Exclusive handle on the store's snapshot
///
/// Holding a context holds the store lock, so every other acquisition waits
/// until this one is released or dropped.
///
/// Mutations go to a staged copy of the snapshot, made on first mutable
/// access. [`release`](Self::release) on a read-write context saves the
/// staged copy and only then swaps it into memory. Dropping a context
/// without releasing it discards the staged copy: the in-memory snapshot and
/// the persisted one stay as they were.
pub struct SnapshotContext {
    guard: OwnedMutexGuard<Snapshot>,
    staged: Option<Snapshot>,
    mode: AccessMode,
    persistence: Arc<dyn SnapshotPersistence>,
    finished: bool,
}

impl SnapshotContext {
    pub(crate) fn new(
        guard: OwnedMutexGuard<Snapshot>,
        mode: AccessMode,
        persistence: Arc<dyn SnapshotPersistence>,
    ) -> Self {
        Self {
            guard,
            staged: None,
            mode,
            persistence,
            finished: false,
        }
    }

    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    pub fn is_read_only(&self) -> bool {
        self.mode == AccessMode::ReadOnly
    }

    /// Current view: the staged copy if any, the in-memory snapshot otherwise
    pub fn snapshot(&self) -> &Snapshot {
        self.staged.as_ref().unwrap_or(&*self.guard)
    }

    pub fn orders(&self) -> &Orders {
        &self.snapshot().orders
    }

    pub fn products(&self) -> &Inventory {
        &self.snapshot().products
    }

    /// Mutable view, staging a copy of the snapshot on first call
    pub fn snapshot_mut(&mut self) -> &mut Snapshot {
        let guard = &self.guard;
        self.staged.get_or_insert_with(|| Snapshot::clone(&**guard))
    }

    pub fn orders_mut(&mut self) -> &mut Orders {
        &mut self.snapshot_mut().orders
    }

    pub fn products_mut(&mut self) -> &mut Inventory {
        &mut self.snapshot_mut().products
    }

    /// Release the context, persisting it if it is read-write
    ///
    /// On a failed save the error is returned and memory is left untouched.
    pub async fn release(mut self) -> StoreResult<()> {
        self.finished = true;

        if self.mode == AccessMode::ReadOnly {
            if self.staged.take().is_some() {
                tracing::debug!("discarding mutations made through a read-only context");
            }
            return Ok(());
        }

        match self.staged.take() {
            Some(staged) => {
                self.persistence.save(&staged).await?;
                *self.guard = staged;
            }
            None => self.persistence.save(&*self.guard).await?,
        }

        tracing::debug!(
            location = %self.persistence.location(),
            orders = self.guard.orders.len(),
            products = self.guard.products.len(),
            "snapshot saved"
        );
        Ok(())
    }

    /// Release without persisting anything
    pub fn discard(mut self) {
        self.finished = true;
        if self.staged.take().is_some() {
            tracing::debug!(mode = ?self.mode, "staged snapshot discarded");
        }
    }
}

impl fmt::Debug for SnapshotContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotContext")
            .field("mode", &self.mode)
            .field("staged", &self.staged.is_some())
            .field("location", &self.persistence.location())
            .field("finished", &self.finished)
            .finish()
    }
}

impl Drop for SnapshotContext {
    fn drop(&mut self) {
        if !self.finished && self.mode == AccessMode::ReadWrite && self.staged.is_some() {
            tracing::warn!("read-write context dropped without release, changes discarded");
        }
    }
}
