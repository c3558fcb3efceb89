//! Statistics API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::statistics::{self, StatsSummary};
use crate::utils::AppResult;

/// GET /api/statistics/summary — dashboard headline numbers
pub async fn summary(State(state): State<ServerState>) -> AppResult<Json<StatsSummary>> {
    let stats = statistics::summary(&state.pool).await?;
    Ok(Json(stats))
}
