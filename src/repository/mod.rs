//! Order repository
//!
//! Every operation acquires the store for its own duration: reads use a
//! read-only context, mutations a read-write one that is persisted on
//! success. A lookup that misses returns [`StoreError::NotFound`] and leaves
//! both memory and storage untouched.
//!
//! Cancelled orders are still returned by [`OrderRepository::get`] and
//! [`OrderRepository::list_page`]; cancellation is only a flag.

use crate::core::error::{StoreError, StoreResult};
use crate::core::inventory::InventoryLedger;
use crate::core::model::{Order, OrderId, Product, ProductId, Snapshot};
use crate::core::pagination::{OrderPage, PageRequest, paginate};
use crate::store::SnapshotStore;
use std::sync::Arc;

/// CRUD operations over orders, with inventory kept in step
#[derive(Clone)]
pub struct OrderRepository {
    store: Arc<SnapshotStore>,
}

impl OrderRepository {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.store
    }

    /// Create an order, reserving one unit of stock per item
    ///
    /// The order is stamped while the store lock is held, so creation dates
    /// follow commit order.
    pub async fn create(
        &self,
        delivery_address: Option<String>,
        items: Vec<ProductId>,
    ) -> StoreResult<OrderId> {
        let id = self
            .store
            .write(move |snapshot| {
                let order = Order::new(delivery_address, items);
                let id = order.id;
                InventoryLedger::new(&mut snapshot.products).allocate(&order.items);
                snapshot.orders.insert(id, order);
                Ok(id)
            })
            .await?;

        tracing::debug!(order_id = %id, "order created");
        Ok(id)
    }

    /// Cancel an order
    ///
    /// The record stays in storage and its items stay allocated.
    pub async fn delete(&self, id: OrderId) -> StoreResult<()> {
        self.store
            .write(|snapshot| {
                let order = find_order_mut(snapshot, id)?;
                order.canceled = true;
                Ok(())
            })
            .await?;

        tracing::debug!(order_id = %id, "order canceled");
        Ok(())
    }

    pub async fn get(&self, id: OrderId) -> StoreResult<Order> {
        self.store
            .read(|snapshot| snapshot.orders.get(&id).cloned())
            .await?
            .ok_or_else(|| StoreError::order_not_found(id))
    }

    /// One page of orders, most recent first
    pub async fn list_page(&self, request: &PageRequest) -> StoreResult<OrderPage> {
        self.store
            .read(|snapshot| paginate(snapshot.orders.values(), request))
            .await
    }

    pub async fn update_delivery_address(&self, id: OrderId, address: String) -> StoreResult<()> {
        self.store
            .write(move |snapshot| {
                let order = find_order_mut(snapshot, id)?;
                order.delivery_address = Some(address);
                Ok(())
            })
            .await?;

        tracing::debug!(order_id = %id, "delivery address updated");
        Ok(())
    }

    /// Replace an order's items, returning the old ones to stock first
    pub async fn update_items(&self, id: OrderId, items: Vec<ProductId>) -> StoreResult<()> {
        self.store
            .write(move |snapshot| {
                let Snapshot { orders, products } = snapshot;
                let order = orders
                    .get_mut(&id)
                    .ok_or_else(|| StoreError::order_not_found(id))?;

                InventoryLedger::new(products).reallocate(&order.items, &items);
                order.items = items;
                Ok(())
            })
            .await?;

        tracing::debug!(order_id = %id, "order items reallocated");
        Ok(())
    }

    pub async fn product(&self, id: ProductId) -> StoreResult<Product> {
        self.store
            .read(|snapshot| snapshot.products.get(&id).cloned())
            .await?
            .ok_or_else(|| StoreError::product_not_found(id))
    }

    /// Add stock to a product, creating it if it was never referenced
    pub async fn restock(&self, id: ProductId, quantity: u32) -> StoreResult<Product> {
        let product = self
            .store
            .write(move |snapshot| {
                Ok(InventoryLedger::new(&mut snapshot.products)
                    .restock(id, quantity)
                    .clone())
            })
            .await?;

        tracing::debug!(product_id = %id, stock = product.stock_qty, "product restocked");
        Ok(product)
    }
}

fn find_order_mut(snapshot: &mut Snapshot, id: OrderId) -> StoreResult<&mut Order> {
    snapshot
        .orders
        .get_mut(&id)
        .ok_or_else(|| StoreError::order_not_found(id))
}
