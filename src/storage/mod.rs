//! Snapshot persistence backends
//!
//! Both backends store the snapshot as JSON. The in-memory backend keeps the
//! encoded bytes rather than a live value so that it goes through exactly the
//! same encode/decode path as the file backend.

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryPersistence;
pub use json_file::JsonFilePersistence;

use crate::core::error::{StorageError, StorageResult};
use crate::core::model::Snapshot;

/// Encode a snapshot as JSON bytes
pub(crate) fn encode_snapshot(snapshot: &Snapshot) -> StorageResult<Vec<u8>> {
    serde_json::to_vec(snapshot).map_err(|e| StorageError::Serialization {
        message: e.to_string(),
    })
}

/// Decode a snapshot from JSON bytes read at `location`
pub(crate) fn decode_snapshot(bytes: &[u8], location: &str) -> StorageResult<Snapshot> {
    serde_json::from_slice(bytes).map_err(|e| StorageError::Corrupted {
        location: location.to_string(),
        message: e.to_string(),
    })
}
