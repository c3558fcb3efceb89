//! Staff Orders API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{Order, OrderStatus, PendingOrder};

use crate::core::ServerState;
use crate::db::repository::order as order_repo;
use crate::orders::tracker;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ActiveQuery {
    pub staff_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AcceptRequest {
    pub staff_id: String,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub staff_id: String,
    pub status: String,
    pub notes: Option<String>,
}

/// GET /api/staff-orders/pending — unassigned pending orders
pub async fn pending(State(state): State<ServerState>) -> AppResult<Json<Vec<PendingOrder>>> {
    let orders = order_repo::find_pending_unassigned(&state.pool).await?;
    Ok(Json(orders))
}

/// GET /api/staff-orders/active?staff_id= — in-flight orders assigned to a
/// staff member
pub async fn active(
    State(state): State<ServerState>,
    Query(query): Query<ActiveQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = order_repo::find_active_for_staff(&state.pool, &query.staff_id).await?;
    Ok(Json(orders))
}

/// POST /api/staff-orders/:id/accept — claim a pending order
pub async fn accept(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<AcceptRequest>,
) -> AppResult<Json<bool>> {
    validate_optional_text(&req.notes, "notes", MAX_NOTE_LEN)?;
    tracker::accept_order(&state.pool, &id, &req.staff_id, req.notes.as_deref()).await?;
    Ok(Json(true))
}

/// POST /api/staff-orders/:id/status — move an assigned order forward
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> AppResult<Json<bool>> {
    validate_optional_text(&req.notes, "notes", MAX_NOTE_LEN)?;
    let status: OrderStatus = req
        .status
        .parse()
        .map_err(|e: String| AppError::validation(e))?;
    tracker::update_status(&state.pool, &id, &req.staff_id, status, req.notes.as_deref()).await?;
    Ok(Json(true))
}

/// POST /api/staff-orders/:id/cancel — staff cancels a non-terminal order
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<AcceptRequest>,
) -> AppResult<Json<bool>> {
    validate_optional_text(&req.notes, "notes", MAX_NOTE_LEN)?;
    tracker::cancel_by_staff(&state.pool, &id, &req.staff_id, req.notes.as_deref()).await?;
    Ok(Json(true))
}
