//! Customers API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Customer, CustomerCreate};

use crate::core::ServerState;
use crate::db::repository::customer;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/customers
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Customer>>> {
    let customers = customer::find_all(&state.pool).await?;
    Ok(Json(customers))
}

/// GET /api/customers/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Customer>> {
    let found = customer::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("customer {id}")))?;
    Ok(Json(found))
}

/// POST /api/customers
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<CustomerCreate>,
) -> AppResult<Json<Customer>> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&data.address, "address", MAX_ADDRESS_LEN)?;
    let created = customer::create(&state.pool, data).await?;
    Ok(Json(created))
}
