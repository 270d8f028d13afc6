//! Order, product and snapshot records
//!
//! These types are both the in-memory state and the persisted layout. Field
//! names are serialized in PascalCase (`Id`, `Date`, `StockQty`, ...) so that
//! existing `database.json` files keep loading.

use crate::core::pagination::PageKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

pub type OrderId = Uuid;
pub type ProductId = Uuid;

/// Product id → product record
pub type Inventory = HashMap<ProductId, Product>;

/// Order id → order record
pub type Orders = HashMap<OrderId, Order>;

/// A stock-keeping unit. Stock never drops below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    pub id: ProductId,
    pub stock_qty: u32,
}

impl Product {
    /// A product seen for the first time starts with no stock
    pub fn new(id: ProductId) -> Self {
        Self { id, stock_qty: 0 }
    }
}

/// A customer order
///
/// Orders are never removed; [`Order::canceled`] is a soft-delete flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Order {
    pub id: OrderId,

    /// Creation time, used only for ordering
    pub date: DateTime<Utc>,

    #[serde(default)]
    pub canceled: bool,

    #[serde(default)]
    pub delivery_address: Option<String>,

    /// Ordered product ids; each duplicate reserves one more unit
    #[serde(default)]
    pub items: Vec<ProductId>,
}

impl Order {
    /// Create an order with a fresh id stamped with the current time
    pub fn new(delivery_address: Option<String>, items: Vec<ProductId>) -> Self {
        Self::with_date(Utc::now(), delivery_address, items)
    }

    pub fn with_date(
        date: DateTime<Utc>,
        delivery_address: Option<String>,
        items: Vec<ProductId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            canceled: false,
            delivery_address,
            items,
        }
    }

    /// Sort key used by keyset pagination
    pub fn page_key(&self) -> PageKey {
        PageKey::new(self.date, self.id)
    }
}

/// The whole persisted state: every order and every product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Snapshot {
    #[serde(default)]
    pub orders: Orders,

    #[serde(default)]
    pub products: Inventory,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty() && self.products.is_empty()
    }

    /// Stock of a product, `None` if it was never referenced
    pub fn stock_of(&self, product_id: &ProductId) -> Option<u32> {
        self.products.get(product_id).map(|p| p.stock_qty)
    }
}
