//! Keyset pagination over orders
//!
//! Orders are listed most recent first. The sort key of an order is the
//! pair `(date, id)`, compared chronologically and then by id, so two orders
//! created in the same instant still have a stable relative position.
//!
//! A page is requested with an optional cursor, the key of the last order
//! the client has already seen. Only orders whose key is strictly lower than
//! the cursor are eligible, which keeps pages stable when new orders are
//! inserted between two requests.
//!
//! # Example
//! ```rust,ignore
//! let first = paginate(snapshot.orders.values(), &PageRequest::first(10));
//! if let Some(cursor) = first.next_cursor() {
//!     let second = paginate(snapshot.orders.values(), &PageRequest::after(cursor, 10));
//! }
//! ```

use crate::core::model::Order;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use uuid::Uuid;

/// Number of orders per page when the caller does not say
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Composite sort key `(date, id)`
///
/// Field order matters: the derived `Ord` compares `date` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PageKey {
    pub date: DateTime<Utc>,
    pub id: Uuid,
}

impl PageKey {
    pub fn new(date: DateTime<Utc>, id: Uuid) -> Self {
        Self { date, id }
    }
}

/// A request for one page of orders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Key of the last order already seen, `None` for the first page
    pub cursor: Option<PageKey>,
    pub page_size: usize,
}

impl PageRequest {
    pub fn new(cursor: Option<PageKey>, page_size: usize) -> Self {
        Self { cursor, page_size }
    }

    pub fn first(page_size: usize) -> Self {
        Self::new(None, page_size)
    }

    pub fn after(cursor: PageKey, page_size: usize) -> Self {
        Self::new(Some(cursor), page_size)
    }

    /// Page size, ensuring a minimum of 1
    pub fn page_size(&self) -> usize {
        self.page_size.max(1)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// One page of orders
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderPage {
    pub orders: Vec<Order>,

    /// True iff more orders exist past the last one of this page
    pub has_more: bool,
}

impl OrderPage {
    /// Cursor for the following page, if there is one
    pub fn next_cursor(&self) -> Option<PageKey> {
        if self.has_more {
            self.orders.last().map(Order::page_key)
        } else {
            None
        }
    }
}

/// Slice one page out of `orders` according to `request`
pub fn paginate<'a, I>(orders: I, request: &PageRequest) -> OrderPage
where
    I: IntoIterator<Item = &'a Order>,
{
    let page_size = request.page_size();

    let mut candidates: Vec<&Order> = orders
        .into_iter()
        .filter(|order| {
            request
                .cursor
                .is_none_or(|cursor| order.page_key() < cursor)
        })
        .collect();

    candidates.sort_unstable_by_key(|order| Reverse(order.page_key()));

    let has_more = candidates.len() > page_size;
    candidates.truncate(page_size);

    OrderPage {
        orders: candidates.into_iter().cloned().collect(),
        has_more,
    }
}
