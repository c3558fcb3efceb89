//! Staff Activity Log Repository

use shared::models::ActivityLogView;
use sqlx::{SqliteConnection, SqlitePool};

use super::RepoResult;
use crate::db::ids;

const LOG_VIEW_SELECT: &str =
    "SELECT l.log_id, l.staff_id, s.name AS staff_name, l.order_id, l.customer_id, c.name AS customer_name, l.action, l.status, l.activity_date \
     FROM staff_activity_log l \
     JOIN staffs s ON l.staff_id = s.staff_id \
     JOIN customers c ON l.customer_id = c.customer_id";

/// Append an audit row on the caller's connection (same transaction as the
/// order mutation it records).
pub async fn append(
    conn: &mut SqliteConnection,
    staff_id: &str,
    order_id: &str,
    customer_id: &str,
    action: &str,
    status: &str,
) -> RepoResult<String> {
    let log_id = ids::next_log_id(conn).await?;
    sqlx::query(
        "INSERT INTO staff_activity_log (log_id, staff_id, order_id, customer_id, action, status, activity_date) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&log_id)
    .bind(staff_id)
    .bind(order_id)
    .bind(customer_id)
    .bind(action)
    .bind(status)
    .bind(shared::util::now_millis())
    .execute(&mut *conn)
    .await?;

    tracing::info!(log_id = %log_id, staff_id, order_id, action, "Staff activity logged");
    Ok(log_id)
}

/// Recent activity for one staff member, newest first.
pub async fn find_for_staff(
    pool: &SqlitePool,
    staff_id: &str,
    limit: i64,
) -> RepoResult<Vec<ActivityLogView>> {
    let sql = format!("{LOG_VIEW_SELECT} WHERE l.staff_id = ? ORDER BY l.activity_date DESC, l.log_id DESC LIMIT ?");
    let rows = sqlx::query_as::<_, ActivityLogView>(&sql)
        .bind(staff_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Recent activity across all staff, newest first.
pub async fn find_recent(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<ActivityLogView>> {
    let sql = format!("{LOG_VIEW_SELECT} ORDER BY l.activity_date DESC, l.log_id DESC LIMIT ?");
    let rows = sqlx::query_as::<_, ActivityLogView>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
