//! Integration test infrastructure for the REST exposure.
//!
//! Builds the real application router over a store backed by the storage
//! backend under test, so every request runs the full path:
//!
//! ```text
//! axum_test::TestServer
//!     └─ Router (order_desk::server::build_router)
//!         └─ handler → OrderRepository → SnapshotStore → SnapshotPersistence
//! ```


use axum::Router;
use order_desk::config::PaginationConfig;
use order_desk::repository::OrderRepository;
use order_desk::server::{AppState, build_router};
use order_desk::store::SnapshotStore;
use std::sync::Arc;

/// Build the application router over `store`, returning a repository handle
/// sharing the same store for seeding and inspection.
///
/// # Example
///
/// ```rust,ignore
/// let (router, repository) = build_test_router(store);
/// let server = axum_test::TestServer::new(router);
/// ```
pub fn build_test_router(store: SnapshotStore) -> (Router, OrderRepository) {
    let repository = OrderRepository::new(Arc::new(store));
    let state = AppState {
        repository: repository.clone(),
        pagination: PaginationConfig::default(),
    };
    (build_router(state), repository)
}
