//! JSON file snapshot persistence
//!
//! The whole snapshot lives in one file (`database.json` by default).
//!
//! # Writes
//!
//! A save encodes the snapshot, writes it to a sibling `*.tmp` file and then
//! renames it over the target. A failed save therefore leaves the previous
//! file intact instead of a truncated one.
//!
//! # Reads
//!
//! A missing file means "nothing persisted yet". Any other I/O failure, or
//! content that does not decode as a snapshot, is an error; there is no
//! repair.

use crate::core::SnapshotPersistence;
use crate::core::error::{StorageError, StorageResult};
use crate::core::model::Snapshot;
use crate::storage::{decode_snapshot, encode_snapshot};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default snapshot file name
pub const DEFAULT_FILE_NAME: &str = "database.json";

/// File-backed implementation of [`SnapshotPersistence`]
///
/// # Example
///
/// ```rust,ignore
/// use order_desk::storage::JsonFilePersistence;
///
/// let persistence = JsonFilePersistence::open("/var/lib/order-desk/database.json").await?;
/// let store = SnapshotStore::open(Arc::new(persistence), StoreOptions::default()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    /// Use `path` as-is; its parent directory must exist by the first save
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use `path`, creating its parent directory if needed
    pub async fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let persistence = Self::new(path);

        if let Some(parent) = persistence.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(parent, e))?;
        }

        Ok(persistence)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn io_error(path: &Path, err: std::io::Error) -> StorageError {
    StorageError::Io {
        location: path.display().to_string(),
        message: err.to_string(),
    }
}

#[async_trait]
impl SnapshotPersistence for JsonFilePersistence {
    async fn load(&self) -> StorageResult<Option<Snapshot>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&self.path, e)),
        };

        decode_snapshot(&bytes, &self.location()).map(Some)
    }

    async fn save(&self, snapshot: &Snapshot) -> StorageResult<()> {
        let bytes = encode_snapshot(snapshot)?;
        let tmp_path = self.tmp_path();

        tokio::fs::write(&tmp_path, &bytes)
            .await
            .map_err(|e| io_error(&tmp_path, e))?;

        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(io_error(&self.path, e));
        }

        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
