//! Macro-generated test suite for `OrderRepository` over a storage backend.
//!
//! Every test runs the repository on a store opened over the backend under
//! test, so inventory, pagination and locking are exercised together with
//! real persistence.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//!
//! repository_tests!(fresh_store());
//! ```
//!
//! # Generated Tests
//!
//! ## Orders
//! - `test_create_and_get` - create then retrieve, verify all fields
//! - `test_create_defaults_delivery_address` - missing address stays `None`
//! - `test_missing_order_is_not_found` - every id-based op reports NotFound
//! - `test_not_found_does_not_persist` - a failed op writes nothing
//! - `test_delete_is_soft` - cancelled orders stay readable
//! - `test_writes_are_persisted` - every mutation reaches the backend
//!
//! ## Inventory
//! - `test_order_lifecycle_stock` - create, reallocate, cancel
//! - `test_stock_clamps_at_zero` - allocating unstocked products
//!
//! ## Pagination
//! - `test_pages_newest_first` - 11 orders, page size 10
//! - `test_cursor_excludes_newer_orders` - cursor on the second oldest
//! - `test_walk_all_pages` - following cursors visits every order once
//!
//! ## Concurrency
//! - `test_concurrent_creates_lose_nothing` - parallel creates all land
//! - `test_concurrent_reallocations_conserve_stock` - no lost stock updates

/// Generate an `OrderRepository` test suite for a storage backend.
///
/// `$factory` must be an expression evaluating to a future that resolves to
/// a fresh `SnapshotStore`. It is re-evaluated for each test.
#[macro_export]
macro_rules! repository_tests {
    ($factory:expr) => {
        mod repository_contract_tests {
            use super::*;
            use futures::future::join_all;
            use order_desk::core::error::StoreError;
            use order_desk::core::pagination::PageRequest;
            use order_desk::repository::OrderRepository;
            use std::collections::HashSet;
            use std::sync::Arc;
            use uuid::Uuid;

            async fn make_repository() -> OrderRepository {
                let store = $factory.await;
                OrderRepository::new(Arc::new(store))
            }

            // ==================================================================
            // Orders
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let repository = make_repository().await;
                let products = restocked_products(&repository, 2, 5).await;

                let id = repository
                    .create(Some("12 Harbour Road".to_string()), products.clone())
                    .await
                    .unwrap();

                let order = repository.get(id).await.unwrap();
                assert_eq!(order.id, id);
                assert_eq!(order.items, products);
                assert_eq!(order.delivery_address.as_deref(), Some("12 Harbour Road"));
                assert!(!order.canceled);
            }

            #[tokio::test]
            async fn test_create_defaults_delivery_address() {
                let repository = make_repository().await;

                let id = repository.create(None, Vec::new()).await.unwrap();

                let order = repository.get(id).await.unwrap();
                assert!(order.delivery_address.is_none());
                assert!(order.items.is_empty());
            }

            #[tokio::test]
            async fn test_missing_order_is_not_found() {
                let repository = make_repository().await;
                let missing = Uuid::new_v4();

                let errors = vec![
                    repository.get(missing).await.unwrap_err(),
                    repository.delete(missing).await.unwrap_err(),
                    repository
                        .update_delivery_address(missing, "Nowhere".to_string())
                        .await
                        .unwrap_err(),
                    repository
                        .update_items(missing, vec![Uuid::new_v4()])
                        .await
                        .unwrap_err(),
                ];

                for err in errors {
                    match err {
                        StoreError::NotFound { id, .. } => assert_eq!(id, missing),
                        other => panic!("Expected NotFound, got {:?}", other),
                    }
                }
            }

            #[tokio::test]
            async fn test_not_found_does_not_persist() {
                let repository = make_repository().await;
                let products = restocked_products(&repository, 1, 2).await;
                repository.create(None, products.clone()).await.unwrap();
                let persisted = repository.store().persistence().load().await.unwrap();

                let _ = repository.update_items(Uuid::new_v4(), products.clone()).await;
                let _ = repository.delete(Uuid::new_v4()).await;

                assert_eq!(
                    repository.store().persistence().load().await.unwrap(),
                    persisted
                );
                assert_eq!(stock(&repository, products[0]).await, 1);
            }

            #[tokio::test]
            async fn test_delete_is_soft() {
                let repository = make_repository().await;
                let products = restocked_products(&repository, 1, 3).await;
                let id = repository.create(None, products.clone()).await.unwrap();

                repository.delete(id).await.unwrap();
                repository.delete(id).await.unwrap();

                let order = repository.get(id).await.unwrap();
                assert!(order.canceled);
                assert_eq!(order.items, products);
                assert_eq!(stock(&repository, products[0]).await, 2);

                let page = repository.list_page(&PageRequest::first(10)).await.unwrap();
                assert_eq!(page.orders.len(), 1);
                assert!(page.orders[0].canceled);
            }

            #[tokio::test]
            async fn test_writes_are_persisted() {
                let repository = make_repository().await;
                let products = restocked_products(&repository, 2, 5).await;
                let id = repository.create(None, vec![products[0]]).await.unwrap();
                repository
                    .update_delivery_address(id, "Gate B".to_string())
                    .await
                    .unwrap();
                repository.update_items(id, vec![products[1]]).await.unwrap();

                let persisted = repository
                    .store()
                    .persistence()
                    .load()
                    .await
                    .unwrap()
                    .expect("snapshot should be persisted");

                let order = &persisted.orders[&id];
                assert_eq!(order.delivery_address.as_deref(), Some("Gate B"));
                assert_eq!(order.items, vec![products[1]]);
                assert_eq!(persisted.stock_of(&products[0]), Some(5));
                assert_eq!(persisted.stock_of(&products[1]), Some(4));
            }

            // ==================================================================
            // Inventory
            // ==================================================================

            #[tokio::test]
            async fn test_order_lifecycle_stock() {
                let repository = make_repository().await;
                let p1 = Uuid::new_v4();
                let p2 = Uuid::new_v4();

                // Unstocked products clamp at zero
                let id = repository.create(None, vec![p1, p1, p2]).await.unwrap();
                assert_eq!(stock(&repository, p1).await, 0);
                assert_eq!(stock(&repository, p2).await, 0);

                // Old items are credited back before the new ones are debited
                repository.update_items(id, vec![p2]).await.unwrap();
                assert_eq!(stock(&repository, p1).await, 2);
                assert_eq!(stock(&repository, p2).await, 0);

                repository.delete(id).await.unwrap();
                assert!(repository.get(id).await.unwrap().canceled);
                assert_eq!(stock(&repository, p1).await, 2);
            }

            #[tokio::test]
            async fn test_stock_clamps_at_zero() {
                let repository = make_repository().await;
                let products = restocked_products(&repository, 1, 1).await;
                let product = products[0];

                repository
                    .create(None, vec![product, product, product])
                    .await
                    .unwrap();

                assert_eq!(stock(&repository, product).await, 0);
            }

            // ==================================================================
            // Pagination
            // ==================================================================

            #[tokio::test]
            async fn test_pages_newest_first() {
                let repository = make_repository().await;
                let orders = dated_orders(11);
                seed_orders(repository.store(), &orders).await;

                let first = repository.list_page(&PageRequest::first(10)).await.unwrap();
                assert_eq!(first.orders.len(), 10);
                assert!(first.has_more);
                assert_eq!(first.orders[0].id, orders[10].id);
                assert_eq!(first.orders[9].id, orders[1].id);

                let cursor = first.next_cursor().unwrap();
                let second = repository
                    .list_page(&PageRequest::after(cursor, 10))
                    .await
                    .unwrap();
                assert_eq!(second.orders.len(), 1);
                assert_eq!(second.orders[0].id, orders[0].id);
                assert!(!second.has_more);
                assert!(second.next_cursor().is_none());
            }

            #[tokio::test]
            async fn test_cursor_excludes_newer_orders() {
                let repository = make_repository().await;
                let orders = dated_orders(11);
                seed_orders(repository.store(), &orders).await;

                let page = repository
                    .list_page(&PageRequest::after(orders[1].page_key(), 10))
                    .await
                    .unwrap();

                let ids: Vec<Uuid> = page.orders.iter().map(|o| o.id).collect();
                assert_eq!(ids, vec![orders[0].id]);
                assert!(!page.has_more);
            }

            #[tokio::test]
            async fn test_walk_all_pages() {
                let repository = make_repository().await;
                let mut orders = dated_orders(7);
                // Same timestamp: the id breaks the tie
                let tied = base_time() + chrono::Duration::seconds(3);
                for order in orders.iter_mut().skip(4) {
                    order.date = tied;
                }
                seed_orders(repository.store(), &orders).await;

                let mut seen = HashSet::new();
                let mut request = PageRequest::first(2);
                loop {
                    let page = repository.list_page(&request).await.unwrap();
                    for order in &page.orders {
                        assert!(seen.insert(order.id), "order {} listed twice", order.id);
                    }
                    match page.next_cursor() {
                        Some(cursor) => request = PageRequest::after(cursor, 2),
                        None => break,
                    }
                }

                assert_eq!(seen.len(), orders.len());
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_creates_lose_nothing() {
                let repository = make_repository().await;
                let products = restocked_products(&repository, 1, 100).await;
                let product = products[0];

                let tasks = (0..20).map(|_| {
                    let repository = repository.clone();
                    tokio::spawn(async move { repository.create(None, vec![product]).await })
                });
                let ids: Vec<Uuid> = join_all(tasks)
                    .await
                    .into_iter()
                    .map(|joined| joined.unwrap().unwrap())
                    .collect();

                for id in &ids {
                    assert!(repository.get(*id).await.is_ok());
                }
                assert_eq!(stock(&repository, product).await, 80);

                let persisted = repository
                    .store()
                    .persistence()
                    .load()
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(persisted.orders.len(), 20);
            }

            #[tokio::test]
            async fn test_concurrent_reallocations_conserve_stock() {
                let repository = make_repository().await;
                let products = restocked_products(&repository, 2, 50).await;
                let (p1, p2) = (products[0], products[1]);

                let mut ids = Vec::new();
                for _ in 0..10 {
                    ids.push(repository.create(None, vec![p1]).await.unwrap());
                }

                // Every order moves its single unit from p1 to p2
                let tasks = ids.iter().map(|id| {
                    let repository = repository.clone();
                    let id = *id;
                    tokio::spawn(async move { repository.update_items(id, vec![p2]).await })
                });
                for joined in join_all(tasks).await {
                    joined.unwrap().unwrap();
                }

                assert_eq!(stock(&repository, p1).await, 50);
                assert_eq!(stock(&repository, p2).await, 40);
            }
        }
    };
}
