//! HTTP handlers for order and product operations
//!
//! Handlers only map requests onto [`OrderRepository`] calls. Request and
//! response bodies use camelCase field names.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::config::PaginationConfig;
use crate::core::error::StoreResult;
use crate::core::model::{Order, Product};
use crate::core::pagination::{PageKey, PageRequest};
use crate::repository::OrderRepository;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: OrderRepository,
    pub pagination: PaginationConfig,
}

fn default_delivery_address() -> String {
    "Take away".to_string()
}

/// Request body for creating an order
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub items: Vec<Uuid>,

    #[serde(default = "default_delivery_address")]
    #[validate(length(min = 1, message = "delivery address cannot be empty"))]
    pub delivery_address: String,
}

/// Query string for listing orders
///
/// The cursor is applied only when both halves are present.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersQuery {
    pub paginated_last_order_id: Option<Uuid>,

    pub paginated_last_order_date: Option<DateTime<Utc>>,

    #[validate(range(min = 1, message = "pageSize must be positive"))]
    pub page_size: Option<usize>,
}

impl ListOrdersQuery {
    fn cursor(&self) -> Option<PageKey> {
        match (self.paginated_last_order_date, self.paginated_last_order_id) {
            (Some(date), Some(id)) => Some(PageKey::new(date, id)),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeliveryAddressQuery {
    pub delivery_address: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RestockQuery {
    #[validate(range(min = 1, message = "quantity must be positive"))]
    pub quantity: u32,
}

/// Order as returned over HTTP
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub canceled: bool,
    pub delivery_address: Option<String>,
    pub items: Vec<Uuid>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            date: order.date,
            canceled: order.canceled,
            delivery_address: order.delivery_address,
            items: order.items,
        }
    }
}

/// One page of orders as returned over HTTP
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersResponse {
    pub orders: Vec<OrderResponse>,
    pub has_more_pages: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub stock_qty: u32,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            stock_qty: product.stock_qty,
        }
    }
}

/// POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> StoreResult<impl IntoResponse> {
    payload.validate()?;

    let id = state
        .repository
        .create(Some(payload.delivery_address), payload.items)
        .await?;

    Ok((StatusCode::CREATED, Json(id)))
}

/// DELETE /api/orders/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> StoreResult<StatusCode> {
    state.repository.delete(id).await?;
    Ok(StatusCode::OK)
}

/// GET /api/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> StoreResult<Json<OrderResponse>> {
    let order = state.repository.get(id).await?;
    Ok(Json(order.into()))
}

/// GET /api/orders
///
/// `pageSize` above the configured maximum is a 400, never a silent cap.
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> StoreResult<Json<ListOrdersResponse>> {
    query.validate()?;

    let page_size = state.pagination.resolve_page_size(query.page_size)?;
    let request = PageRequest::new(query.cursor(), page_size);
    let page = state.repository.list_page(&request).await?;

    Ok(Json(ListOrdersResponse {
        orders: page.orders.into_iter().map(OrderResponse::from).collect(),
        has_more_pages: page.has_more,
    }))
}

/// PUT /api/orders/{id}/UpdateDeliveryAddress?deliveryAddress=...
pub async fn update_delivery_address(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<UpdateDeliveryAddressQuery>,
) -> StoreResult<StatusCode> {
    state
        .repository
        .update_delivery_address(id, query.delivery_address)
        .await?;
    Ok(StatusCode::OK)
}

/// PUT /api/orders/{id}/UpdateOrderItems
pub async fn update_order_items(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(items): Json<Vec<Uuid>>,
) -> StoreResult<StatusCode> {
    state.repository.update_items(id, items).await?;
    Ok(StatusCode::OK)
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> StoreResult<Json<ProductResponse>> {
    let product = state.repository.product(id).await?;
    Ok(Json(product.into()))
}

/// PUT /api/products/{id}/Restock?quantity=N
pub async fn restock_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<RestockQuery>,
) -> StoreResult<Json<ProductResponse>> {
    query.validate()?;

    let product = state.repository.restock(id, query.quantity).await?;
    Ok(Json(product.into()))
}
