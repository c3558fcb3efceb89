//! Activity Log API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::models::ActivityLogView;

use crate::core::ServerState;
use crate::db::repository::activity_log;
use crate::utils::AppResult;

/// Query params for listing activity
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Restrict to one staff member
    pub staff_id: Option<String>,
    /// Max rows (default 100, staff views default 50 client-side)
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

/// GET /api/activity-log — recent staff activity, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<ActivityLogView>>> {
    let limit = query.limit.clamp(1, 1000);
    let entries = match query.staff_id {
        Some(staff_id) => activity_log::find_for_staff(&state.pool, &staff_id, limit).await?,
        None => activity_log::find_recent(&state.pool, limit).await?,
    };
    Ok(Json(entries))
}
