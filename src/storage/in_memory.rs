//! In-memory snapshot persistence for testing and ephemeral runs

use crate::core::SnapshotPersistence;
use crate::core::error::{StorageError, StorageResult};
use crate::core::model::Snapshot;
use crate::storage::{decode_snapshot, encode_snapshot};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

const BACKEND: &str = "in-memory";

/// In-memory persistence backend
///
/// Holds the last saved snapshot as JSON bytes. Clones share the same
/// buffer, so a test can keep a handle and inspect what the store wrote.
#[derive(Clone, Default)]
pub struct InMemoryPersistence {
    data: Arc<RwLock<Option<Vec<u8>>>>,
}

impl InMemoryPersistence {
    /// Create an empty backend: nothing persisted yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that already holds `bytes`, valid or not
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Arc::new(RwLock::new(Some(bytes.into()))),
        }
    }

    /// Raw bytes of the last save
    pub fn bytes(&self) -> StorageResult<Option<Vec<u8>>> {
        let data = self.data.read().map_err(|e| StorageError::Unavailable {
            backend: BACKEND.to_string(),
            message: format!("Failed to acquire read lock: {}", e),
        })?;

        Ok(data.clone())
    }

    /// Overwrite the stored bytes, bypassing encoding
    pub fn set_bytes(&self, bytes: impl Into<Vec<u8>>) -> StorageResult<()> {
        let mut data = self.data.write().map_err(|e| StorageError::Unavailable {
            backend: BACKEND.to_string(),
            message: format!("Failed to acquire write lock: {}", e),
        })?;

        *data = Some(bytes.into());
        Ok(())
    }
}

#[async_trait]
impl SnapshotPersistence for InMemoryPersistence {
    async fn load(&self) -> StorageResult<Option<Snapshot>> {
        match self.bytes()? {
            Some(bytes) => Ok(Some(decode_snapshot(&bytes, BACKEND)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, snapshot: &Snapshot) -> StorageResult<()> {
        let bytes = encode_snapshot(snapshot)?;
        self.set_bytes(bytes)
    }

    fn location(&self) -> String {
        BACKEND.to_string()
    }
}
