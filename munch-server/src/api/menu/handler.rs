//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

use crate::core::ServerState;
use crate::db::repository::menu_item;
use crate::utils::validation::{MAX_NAME_LEN, validate_price, validate_required_text};
use crate::utils::{AppError, AppResult};

/// Query params for listing menu items
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Filter by category
    pub category_id: Option<String>,
    /// Name substring search
    pub search: Option<String>,
    /// Only available items
    #[serde(default)]
    pub available: bool,
}

/// GET /api/menu — list, with optional category/search/availability filters
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let items = if let Some(category_id) = query.category_id {
        menu_item::find_by_category(&state.pool, &category_id).await?
    } else if let Some(search) = query.search {
        menu_item::search(&state.pool, &search).await?
    } else if query.available {
        menu_item::find_available(&state.pool).await?
    } else {
        menu_item::find_all(&state.pool).await?
    };
    Ok(Json(items))
}

/// GET /api/menu/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let item = menu_item::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("menu item {id}")))?;
    Ok(Json(item))
}

/// POST /api/menu
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    validate_required_text(&data.item_name, "item name", MAX_NAME_LEN)?;
    validate_price(data.price)?;
    let created = menu_item::create(&state.pool, data).await?;
    Ok(Json(created))
}

/// PUT /api/menu/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    if let Some(ref name) = data.item_name {
        validate_required_text(name, "item name", MAX_NAME_LEN)?;
    }
    if let Some(price) = data.price {
        validate_price(price)?;
    }
    let updated = menu_item::update(&state.pool, &id, data).await?;
    Ok(Json(updated))
}

/// DELETE /api/menu/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = menu_item::delete(&state.pool, &id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("menu item {id}")));
    }
    Ok(Json(true))
}
