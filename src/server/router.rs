//! Router builder for the REST exposure

use crate::server::handlers::{
    AppState, create_order, delete_order, get_order, get_product, list_orders, restock_product,
    update_delivery_address, update_order_items,
};
use axum::{
    Json, Router,
    routing::{get, put},
};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

/// Build order and product routes
///
/// - GET    /api/orders                               - List a page of orders
/// - POST   /api/orders                               - Create an order
/// - GET    /api/orders/{id}                          - Get an order
/// - DELETE /api/orders/{id}                          - Cancel an order
/// - PUT    /api/orders/{id}/UpdateDeliveryAddress    - Change the delivery address
/// - PUT    /api/orders/{id}/UpdateOrderItems         - Replace the items
/// - GET    /api/products/{id}                        - Get a product's stock
/// - PUT    /api/products/{id}/Restock                - Add stock
pub fn build_order_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/orders", get(list_orders).post(create_order))
        .route("/api/orders/{id}", get(get_order).delete(delete_order))
        .route(
            "/api/orders/{id}/UpdateDeliveryAddress",
            put(update_delivery_address),
        )
        .route("/api/orders/{id}/UpdateOrderItems", put(update_order_items))
        .route("/api/products/{id}", get(get_product))
        .route("/api/products/{id}/Restock", put(restock_product))
        .with_state(state)
}

/// Health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "order-desk"
    }))
}

/// Full application router with request tracing
pub fn build_router(state: AppState) -> Router {
    health_routes()
        .merge(build_order_routes(state))
        .layer(TraceLayer::new_for_http())
}
