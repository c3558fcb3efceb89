//! Cart API Handlers
//!
//! Item lookups go through the menu repository so carts always carry the
//! current name and price; everything else is in-memory cart state.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::menu_item;
use crate::orders::cart::CartSummary;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub menu_id: String,
}

fn cart_summary(state: &ServerState, session: &str) -> AppResult<CartSummary> {
    state
        .carts
        .with_cart(session, |cart| cart.summary())
        .ok_or_else(|| AppError::not_found(format!("cart session {session}")))
}

/// POST /api/cart — open a new cart session
pub async fn create_session(State(state): State<ServerState>) -> AppResult<Json<SessionResponse>> {
    let session_id = state.carts.create_session();
    Ok(Json(SessionResponse { session_id }))
}

/// GET /api/cart/:session
pub async fn summary(
    State(state): State<ServerState>,
    Path(session): Path<String>,
) -> AppResult<Json<CartSummary>> {
    Ok(Json(cart_summary(&state, &session)?))
}

/// DELETE /api/cart/:session — empty the cart (session stays alive)
pub async fn clear(
    State(state): State<ServerState>,
    Path(session): Path<String>,
) -> AppResult<Json<CartSummary>> {
    if !state.carts.clear(&session) {
        return Err(AppError::not_found(format!("cart session {session}")));
    }
    Ok(Json(cart_summary(&state, &session)?))
}

/// POST /api/cart/:session/items — add one unit of a menu item
pub async fn add_item(
    State(state): State<ServerState>,
    Path(session): Path<String>,
    Json(req): Json<AddItemRequest>,
) -> AppResult<Json<CartSummary>> {
    let item = menu_item::find_by_id(&state.pool, &req.menu_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("menu item {}", req.menu_id)))?;
    if !item.is_available {
        return Err(AppError::business_rule(format!(
            "menu item '{}' is currently unavailable",
            item.item_name
        )));
    }

    state
        .carts
        .with_cart(&session, |cart| {
            cart.add(&item.menu_id, &item.item_name, item.price);
            cart.summary()
        })
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("cart session {session}")))
}

/// POST /api/cart/:session/items/:menu_id/increase
pub async fn increase_item(
    State(state): State<ServerState>,
    Path((session, menu_id)): Path<(String, String)>,
) -> AppResult<Json<CartSummary>> {
    mutate_line(&state, &session, &menu_id, |cart, id| cart.increase(id))
}

/// POST /api/cart/:session/items/:menu_id/decrease
///
/// Decreasing a quantity-1 line removes it from the cart.
pub async fn decrease_item(
    State(state): State<ServerState>,
    Path((session, menu_id)): Path<(String, String)>,
) -> AppResult<Json<CartSummary>> {
    mutate_line(&state, &session, &menu_id, |cart, id| cart.decrease(id))
}

/// DELETE /api/cart/:session/items/:menu_id
pub async fn remove_item(
    State(state): State<ServerState>,
    Path((session, menu_id)): Path<(String, String)>,
) -> AppResult<Json<CartSummary>> {
    mutate_line(&state, &session, &menu_id, |cart, id| cart.remove(id))
}

fn mutate_line(
    state: &ServerState,
    session: &str,
    menu_id: &str,
    op: impl FnOnce(&mut crate::orders::Cart, &str) -> bool,
) -> AppResult<Json<CartSummary>> {
    let result = state
        .carts
        .with_cart(session, |cart| {
            let found = op(cart, menu_id);
            (found, cart.summary())
        })
        .ok_or_else(|| AppError::not_found(format!("cart session {session}")))?;

    let (found, summary) = result;
    if !found {
        return Err(AppError::not_found(format!("menu item {menu_id} not in cart")));
    }
    Ok(Json(summary))
}
