//! # Order Desk
//!
//! An order and inventory repository persisted as a single JSON snapshot.
//!
//! ## Features
//!
//! - **Inventory Ledger**: one unit of stock per order item, clamped at zero
//! - **Snapshot Store**: serialized read-only and read-write access with
//!   transactional persistence
//! - **Order Repository**: create, cancel, fetch and update orders
//! - **Keyset Pagination**: most recent first, stable under concurrent inserts
//! - **REST Exposure**: axum router with YAML configuration
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use order_desk::prelude::*;
//!
//! let store = SnapshotStore::open(
//!     Arc::new(JsonFilePersistence::open("database.json").await?),
//!     StoreOptions::default(),
//! )
//! .await?;
//! let orders = OrderRepository::new(Arc::new(store));
//!
//! let id = orders.create(Some("Take away".into()), vec![product_id]).await?;
//! orders.update_items(id, vec![other_product_id]).await?;
//!
//! let page = orders.list_page(&PageRequest::first(10)).await?;
//! ```

pub mod config;
pub mod core;
pub mod repository;
pub mod server;
pub mod storage;
pub mod store;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{ErrorResponse, StorageError, StorageResult, StoreError, StoreResult},
        inventory::InventoryLedger,
        model::{Inventory, Order, OrderId, Orders, Product, ProductId, Snapshot},
        pagination::{DEFAULT_PAGE_SIZE, OrderPage, PageKey, PageRequest, paginate},
        service::SnapshotPersistence,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryPersistence, JsonFilePersistence};
    pub use crate::store::{AccessMode, SnapshotContext, SnapshotStore, StoreOptions};

    // === Repository ===
    pub use crate::repository::OrderRepository;

    // === Configuration ===
    pub use crate::config::{AppConfig, PaginationConfig, StorageBackend, StorageConfig};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder, build_router};

    // === Re-exports from external crates ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
