//! Staffs API Handlers

use axum::{Json, extract::State};
use shared::models::{Staff, StaffCreate};

use crate::core::ServerState;
use crate::db::repository::staff;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};

/// GET /api/staffs
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Staff>>> {
    let staffs = staff::find_all(&state.pool).await?;
    Ok(Json(staffs))
}

/// POST /api/staffs
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<StaffCreate>,
) -> AppResult<Json<Staff>> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    let created = staff::create(&state.pool, data).await?;
    Ok(Json(created))
}
