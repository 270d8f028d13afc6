//! Core module containing the data model, inventory rules and pagination

pub mod error;
pub mod inventory;
pub mod model;
pub mod pagination;
pub mod service;

pub use error::{StorageError, StorageResult, StoreError, StoreResult};
pub use inventory::InventoryLedger;
pub use model::{Inventory, Order, OrderId, Orders, Product, ProductId, Snapshot};
pub use pagination::{OrderPage, PageKey, PageRequest, paginate};
pub use service::SnapshotPersistence;
