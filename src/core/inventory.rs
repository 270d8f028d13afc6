//! Inventory ledger
//!
//! Moves stock in single units as order items are reserved or returned.
//! Every movement clamps at zero: over-allocating a product is absorbed
//! silently instead of being rejected, and unknown product ids are created
//! on first reference with a stock of 0.

use crate::core::model::{Inventory, Product, ProductId};

/// Direction of a single-unit stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Movement {
    /// Return a unit to stock
    Credit,
    /// Reserve a unit from stock, never going below zero
    Debit,
}

/// Mutable view over an [`Inventory`] that applies allocation rules
///
/// # Example
///
/// ```rust,ignore
/// let mut ledger = InventoryLedger::new(&mut snapshot.products);
/// ledger.reallocate(&order.items, &new_items);
/// ```
pub struct InventoryLedger<'a> {
    inventory: &'a mut Inventory,
}

impl<'a> InventoryLedger<'a> {
    pub fn new(inventory: &'a mut Inventory) -> Self {
        Self { inventory }
    }

    /// Reserve one unit per item
    pub fn allocate(&mut self, items: &[ProductId]) {
        self.apply(items, Movement::Debit);
    }

    /// Return every unit of `old_items`, then reserve `new_items`
    pub fn reallocate(&mut self, old_items: &[ProductId], new_items: &[ProductId]) {
        self.apply(old_items, Movement::Credit);
        self.apply(new_items, Movement::Debit);
    }

    /// Add `quantity` units to a product, saturating at `u32::MAX`
    pub fn restock(&mut self, product_id: ProductId, quantity: u32) -> &Product {
        let product = self.product_entry(product_id);
        product.stock_qty = product.stock_qty.saturating_add(quantity);
        product
    }

    fn apply(&mut self, items: &[ProductId], movement: Movement) {
        for product_id in items {
            let product = self.product_entry(*product_id);
            product.stock_qty = match movement {
                Movement::Credit => product.stock_qty.saturating_add(1),
                Movement::Debit => product.stock_qty.saturating_sub(1),
            };
        }
    }

    fn product_entry(&mut self, product_id: ProductId) -> &mut Product {
        self.inventory
            .entry(product_id)
            .or_insert_with(|| Product::new(product_id))
    }
}
