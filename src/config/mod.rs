//! Configuration loading and management
//!
//! Configuration is a YAML document; every section and field is optional.
//!
//! ```yaml
//! server:
//!   bind: "0.0.0.0:8080"
//! storage:
//!   backend: json_file        # or in_memory
//!   path: /var/lib/order-desk/database.json
//!   reload_on_acquire: true
//! pagination:
//!   default_page_size: 10
//!   max_page_size: 100
//! ```

use crate::core::SnapshotPersistence;
use crate::core::error::{StoreError, StoreResult};
use crate::core::pagination::DEFAULT_PAGE_SIZE;
use crate::storage::json_file::DEFAULT_FILE_NAME;
use crate::storage::{InMemoryPersistence, JsonFilePersistence};
use crate::store::{SnapshotStore, StoreOptions};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Environment variable consulted by the binary for the config file path
pub const CONFIG_ENV_VAR: &str = "ORDER_DESK_CONFIG";

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind (e.g., "127.0.0.1:3000")
    #[serde(default = "default_bind")]
    pub bind: String,
}

/// Which persistence backend to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    JsonFile,
    InMemory,
}

/// Snapshot persistence settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Snapshot file, only used by the `json_file` backend
    #[serde(default = "default_path")]
    pub path: PathBuf,

    #[serde(default = "default_true")]
    pub reload_on_acquire: bool,
}

/// Listing defaults and limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_FILE_NAME)
}

fn default_true() -> bool {
    true
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> usize {
    100
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_path(),
            reload_on_acquire: true,
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `ORDER_DESK_CONFIG` if set, defaults otherwise
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::from_yaml_file(&path),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Reject settings that cannot work
    pub fn validate(&self) -> Result<()> {
        let pagination = &self.pagination;
        if pagination.default_page_size == 0 {
            bail!("pagination.default_page_size must be at least 1");
        }
        if pagination.max_page_size < pagination.default_page_size {
            bail!(
                "pagination.max_page_size ({}) is lower than default_page_size ({})",
                pagination.max_page_size,
                pagination.default_page_size
            );
        }
        if self.storage.backend == StorageBackend::JsonFile
            && self.storage.path.as_os_str().is_empty()
        {
            bail!("storage.path is required for the json_file backend");
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            reload_on_acquire: self.reload_on_acquire,
        }
    }

    /// Build the configured persistence backend
    pub async fn build_persistence(&self) -> StoreResult<Arc<dyn SnapshotPersistence>> {
        let persistence: Arc<dyn SnapshotPersistence> = match self.backend {
            StorageBackend::JsonFile => Arc::new(JsonFilePersistence::open(&self.path).await?),
            StorageBackend::InMemory => Arc::new(InMemoryPersistence::new()),
        };
        Ok(persistence)
    }

    /// Open a snapshot store over the configured backend
    pub async fn open_store(&self) -> StoreResult<SnapshotStore> {
        let persistence = self.build_persistence().await?;
        SnapshotStore::open(persistence, self.store_options()).await
    }
}

impl PaginationConfig {
    /// Resolve a requested page size against defaults and limits
    ///
    /// A size above `max_page_size` is rejected rather than capped, so
    /// `has_more` always refers to the size the caller asked for.
    pub fn resolve_page_size(&self, requested: Option<usize>) -> StoreResult<usize> {
        let page_size = requested.unwrap_or(self.default_page_size);
        if page_size > self.max_page_size {
            return Err(StoreError::Validation {
                field: "pageSize".to_string(),
                message: format!("pageSize must not exceed {}", self.max_page_size),
            });
        }
        Ok(page_size.max(1))
    }
}
