//! Macro-generated test suite for `SnapshotPersistence` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use order_desk::storage::InMemoryPersistence;
//!
//! snapshot_persistence_tests!(InMemoryPersistence::new());
//! ```
//!
//! # Generated Tests
//!
//! - `test_load_before_any_save` - a fresh backend loads `None`
//! - `test_save_then_load` - the loaded snapshot equals the saved one
//! - `test_save_replaces_previous` - a second save fully overwrites the first
//! - `test_empty_snapshot_round_trip` - an empty snapshot loads as `Some(empty)`
//! - `test_location_is_not_empty` - backends name where they store data
//! - `test_store_reopens_saved_state` - a store opened on the backend sees prior writes

/// Generate a `SnapshotPersistence` conformance test suite.
///
/// `$factory` must be an expression evaluating to a fresh backend
/// implementing `SnapshotPersistence + 'static`. It is re-evaluated for each
/// test to ensure isolation.
#[macro_export]
macro_rules! snapshot_persistence_tests {
    ($factory:expr) => {
        mod snapshot_persistence_contract_tests {
            use super::*;
            use order_desk::core::SnapshotPersistence;
            use order_desk::core::model::Snapshot;
            use order_desk::repository::OrderRepository;
            use order_desk::store::{SnapshotStore, StoreOptions};
            use std::sync::Arc;

            #[tokio::test]
            async fn test_load_before_any_save() {
                let persistence = $factory;

                let loaded = persistence.load().await.unwrap();
                assert!(loaded.is_none(), "Nothing saved yet should load as None");
            }

            #[tokio::test]
            async fn test_save_then_load() {
                let persistence = $factory;
                let snapshot = sample_snapshot();

                persistence.save(&snapshot).await.unwrap();

                let loaded = persistence.load().await.unwrap();
                assert_eq!(loaded, Some(snapshot));
            }

            #[tokio::test]
            async fn test_save_replaces_previous() {
                let persistence = $factory;
                let first = sample_snapshot();
                let second = sample_snapshot();

                persistence.save(&first).await.unwrap();
                persistence.save(&second).await.unwrap();

                let loaded = persistence.load().await.unwrap().unwrap();
                assert_eq!(loaded, second);
                for id in first.orders.keys() {
                    assert!(
                        !loaded.orders.contains_key(id),
                        "Orders of the replaced snapshot should be gone"
                    );
                }
            }

            #[tokio::test]
            async fn test_empty_snapshot_round_trip() {
                let persistence = $factory;

                persistence.save(&Snapshot::new()).await.unwrap();

                let loaded = persistence.load().await.unwrap();
                assert_eq!(loaded, Some(Snapshot::new()));
            }

            #[tokio::test]
            async fn test_location_is_not_empty() {
                let persistence = $factory;
                assert!(!persistence.location().is_empty());
            }

            #[tokio::test]
            async fn test_store_reopens_saved_state() {
                let persistence: Arc<dyn SnapshotPersistence> = Arc::new($factory);

                let store = SnapshotStore::open(Arc::clone(&persistence), StoreOptions::default())
                    .await
                    .unwrap();
                let repository = OrderRepository::new(Arc::new(store));
                let product = restocked_products(&repository, 1, 4).await[0];
                let order_id = repository
                    .create(Some("Pier 9".to_string()), vec![product])
                    .await
                    .unwrap();
                drop(repository);

                let reopened = SnapshotStore::open(persistence, StoreOptions::default())
                    .await
                    .unwrap();
                let reopened = OrderRepository::new(Arc::new(reopened));

                let order = reopened.get(order_id).await.unwrap();
                assert_eq!(order.delivery_address.as_deref(), Some("Pier 9"));
                assert_eq!(order.items, vec![product]);
                assert_eq!(stock(&reopened, product).await, 3);
            }
        }
    };
}
