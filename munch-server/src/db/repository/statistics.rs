//! Dashboard Statistics

use serde::Serialize;
use sqlx::SqlitePool;

use super::RepoResult;

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub total_orders: i64,
    pub pending_orders: i64,
    pub delivered_orders: i64,
    pub cancelled_orders: i64,
    /// Revenue counts delivered orders only
    pub total_revenue: f64,
    pub available_menu_items: i64,
}

pub async fn summary(pool: &SqlitePool) -> RepoResult<StatsSummary> {
    let total_orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await?;
    let pending_orders: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE order_status = 'Pending'")
            .fetch_one(pool)
            .await?;
    let delivered_orders: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE order_status = 'Delivered'")
            .fetch_one(pool)
            .await?;
    let cancelled_orders: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE order_status = 'Cancelled'")
            .fetch_one(pool)
            .await?;
    let total_revenue: f64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(total_fee), 0.0) FROM orders WHERE order_status = 'Delivered'",
    )
    .fetch_one(pool)
    .await?;
    let available_menu_items: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM menu_items WHERE is_available = 1")
            .fetch_one(pool)
            .await?;

    Ok(StatsSummary {
        total_orders,
        pending_orders,
        delivered_orders,
        cancelled_orders,
        total_revenue,
        available_menu_items,
    })
}
