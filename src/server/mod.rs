//! HTTP exposure of the order repository
//!
//! `ServerBuilder` wires configuration, storage and the router together:
//! - Order routes under `/api/orders`
//! - Product stock routes under `/api/products`
//! - Health checks at `/health` and `/healthz`

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
pub use router::build_router;
