//! Snapshot store: the single owner of the in-memory state
//!
//! # Lifecycle
//!
//! A store is created with [`SnapshotStore::open`], which loads the persisted
//! snapshot if there is one and starts empty otherwise. It is then shared
//! behind an `Arc` by whoever needs it; there is no process-wide instance.
//!
//! # Locking
//!
//! One mutex guards the in-memory snapshot. An acquired [`SnapshotContext`]
//! holds it until release, so the load → mutate → save cycle of a read-write
//! operation cannot interleave with any other acquisition and no update is
//! lost. The lock is never held by the store itself between operations.
//!
//! # Reloading
//!
//! With [`StoreOptions::reload_on_acquire`] (the default), every acquisition
//! first re-reads the persisted snapshot, picking up changes made to the
//! backing file by anything else. A failed reload returns the error and
//! leaves the in-memory snapshot as it was.

pub mod context;

pub use context::{AccessMode, SnapshotContext};

use crate::core::SnapshotPersistence;
use crate::core::error::StoreResult;
use crate::core::model::Snapshot;
use crate::storage::InMemoryPersistence;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Behavior switches for a [`SnapshotStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Re-read persisted state at the start of every acquisition
    pub reload_on_acquire: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            reload_on_acquire: true,
        }
    }
}

/// Owner of the in-memory [`Snapshot`] and its persistence backend
pub struct SnapshotStore {
    state: Arc<Mutex<Snapshot>>,
    persistence: Arc<dyn SnapshotPersistence>,
    options: StoreOptions,
}

impl SnapshotStore {
    /// Open a store, loading the persisted snapshot when one exists
    pub async fn open(
        persistence: Arc<dyn SnapshotPersistence>,
        options: StoreOptions,
    ) -> StoreResult<Self> {
        let snapshot = persistence.load().await?;

        match &snapshot {
            Some(s) => tracing::info!(
                location = %persistence.location(),
                orders = s.orders.len(),
                products = s.products.len(),
                "snapshot loaded"
            ),
            None => tracing::info!(
                location = %persistence.location(),
                "no persisted snapshot, starting empty"
            ),
        }

        Ok(Self {
            state: Arc::new(Mutex::new(snapshot.unwrap_or_default())),
            persistence,
            options,
        })
    }

    /// Empty store over a fresh [`InMemoryPersistence`]
    pub fn in_memory() -> Self {
        Self {
            state: Arc::new(Mutex::new(Snapshot::new())),
            persistence: Arc::new(InMemoryPersistence::new()),
            options: StoreOptions::default(),
        }
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    pub fn persistence(&self) -> &Arc<dyn SnapshotPersistence> {
        &self.persistence
    }

    /// Take the store lock and return a context over the snapshot
    pub async fn acquire(&self, mode: AccessMode) -> StoreResult<SnapshotContext> {
        let mut guard = Arc::clone(&self.state).lock_owned().await;

        if self.options.reload_on_acquire {
            if let Some(loaded) = self.persistence.load().await? {
                *guard = loaded;
            }
        }

        Ok(SnapshotContext::new(
            guard,
            mode,
            Arc::clone(&self.persistence),
        ))
    }

    /// Release a context, persisting it if it was acquired read-write
    pub async fn release(&self, context: SnapshotContext) -> StoreResult<()> {
        context.release().await
    }

    /// Run `f` against a read-only context
    pub async fn read<F, R>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&Snapshot) -> R,
    {
        let context = self.acquire(AccessMode::ReadOnly).await?;
        let value = f(context.snapshot());
        context.release().await?;
        Ok(value)
    }

    /// Run `f` against a read-write context
    ///
    /// The snapshot is persisted only when `f` succeeds. When `f` returns an
    /// error its changes are discarded and nothing is written.
    pub async fn write<F, R>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&mut Snapshot) -> StoreResult<R>,
    {
        let mut context = self.acquire(AccessMode::ReadWrite).await?;

        match f(context.snapshot_mut()) {
            Ok(value) => {
                context.release().await?;
                Ok(value)
            }
            Err(err) => {
                context.discard();
                Err(err)
            }
        }
    }

    /// Copy of the current in-memory snapshot, without reloading
    pub async fn snapshot(&self) -> Snapshot {
        self.state.lock().await.clone()
    }
}
