//! Orders API Handlers (customer-facing)

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{Order, OrderLine, OrderStatus, OrderSummary, OrderTrack};

use crate::core::ServerState;
use crate::db::repository::{order as order_repo, order_track};
use crate::orders::{CheckoutRequest, place_order, tracker};
use crate::utils::{AppError, AppResult};

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub customer_id: Option<String>,
    pub status: Option<String>,
}

/// Response for order listing: either a customer history or a plain order
/// list (admin view).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OrderList {
    History(Vec<OrderSummary>),
    Orders(Vec<Order>),
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order_id: String,
}

/// Order with its lines
#[derive(Debug, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

#[derive(Debug, Deserialize)]
pub struct CustomerAction {
    pub customer_id: String,
}

/// POST /api/orders — checkout the session cart into a persisted order
pub async fn checkout(
    State(state): State<ServerState>,
    Json(req): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    let order_id = place_order(&state.pool, &state.carts, &req).await?;
    Ok(Json(CheckoutResponse { order_id }))
}

/// GET /api/orders — customer history (`?customer_id=`), status filter
/// (`?status=`), or all orders
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<OrderList>> {
    if let Some(customer_id) = query.customer_id {
        let history = order_repo::history_for_customer(&state.pool, &customer_id).await?;
        return Ok(Json(OrderList::History(history)));
    }
    let orders = match query.status {
        Some(status) => {
            let parsed: OrderStatus = status
                .parse()
                .map_err(|e: String| AppError::validation(e))?;
            order_repo::find_by_status(&state.pool, parsed.as_str()).await?
        }
        None => order_repo::find_all(&state.pool).await?,
    };
    Ok(Json(OrderList::Orders(orders)))
}

/// GET /api/orders/:id — order with its lines
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderDetail>> {
    let order = order_repo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("order {id}")))?;
    let lines = order_repo::find_lines(&state.pool, &id).await?;
    Ok(Json(OrderDetail { order, lines }))
}

/// GET /api/orders/:id/tracks — tracking timeline, oldest first
pub async fn tracks(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<OrderTrack>>> {
    if order_repo::find_by_id(&state.pool, &id).await?.is_none() {
        return Err(AppError::not_found(format!("order {id}")));
    }
    let timeline = order_track::find_by_order(&state.pool, &id).await?;
    Ok(Json(timeline))
}

/// POST /api/orders/:id/cancel — customer cancels a pending order
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<CustomerAction>,
) -> AppResult<Json<bool>> {
    tracker::cancel_by_customer(&state.pool, &id, &req.customer_id).await?;
    Ok(Json(true))
}

/// POST /api/orders/:id/confirm-delivery — customer confirms receipt
pub async fn confirm_delivery(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<CustomerAction>,
) -> AppResult<Json<bool>> {
    tracker::confirm_delivery(&state.pool, &id, &req.customer_id).await?;
    Ok(Json(true))
}
