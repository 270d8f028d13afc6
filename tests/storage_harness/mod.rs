//! Shared test harness for snapshot persistence backends
//!
//! Provides helpers for seeding stores with products and dated orders, and
//! the conformance macros every backend is run through.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//!
//! snapshot_persistence_tests!(InMemoryPersistence::new());
//! repository_tests!(fresh_store());
//! rest_integration_tests!(fresh_store());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod persistence_tests;

#[macro_use]
pub mod repository_tests;

#[macro_use]
pub mod integration;

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;
use uuid::Uuid;

use order_desk::core::model::{Order, Product, ProductId, Snapshot};
use order_desk::repository::OrderRepository;
use order_desk::store::SnapshotStore;

/// Fixed reference time so dated orders are reproducible
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// `count` orders dated `base_time() + i` seconds, oldest first
pub fn dated_orders(count: i64) -> Vec<Order> {
    (0..count)
        .map(|i| {
            Order::with_date(
                base_time() + Duration::seconds(i),
                Some(format!("Address {}", i)),
                Vec::new(),
            )
        })
        .collect()
}

/// Snapshot holding two stocked products and one order for both
pub fn sample_snapshot() -> Snapshot {
    let mut snapshot = Snapshot::new();
    let mut items = Vec::new();
    for stock in [3u32, 7] {
        let mut product = Product::new(Uuid::new_v4());
        product.stock_qty = stock;
        items.push(product.id);
        snapshot.products.insert(product.id, product);
    }

    let order = Order::new(Some("Take away".to_string()), items);
    snapshot.orders.insert(order.id, order);
    snapshot
}

/// Insert pre-built orders directly, bypassing inventory allocation
pub async fn seed_orders(store: &SnapshotStore, orders: &[Order]) {
    let orders = orders.to_vec();
    store
        .write(move |snapshot| {
            for order in orders {
                snapshot.orders.insert(order.id, order);
            }
            Ok(())
        })
        .await
        .unwrap();
}

/// Create `count` products restocked to `quantity`
pub async fn restocked_products(
    repository: &OrderRepository,
    count: usize,
    quantity: u32,
) -> Vec<ProductId> {
    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        let id = Uuid::new_v4();
        repository.restock(id, quantity).await.unwrap();
        ids.push(id);
    }
    ids
}

pub async fn stock(repository: &OrderRepository, id: ProductId) -> u32 {
    repository.product(id).await.unwrap().stock_qty
}

pub fn repository_over(store: Arc<SnapshotStore>) -> OrderRepository {
    OrderRepository::new(store)
}
