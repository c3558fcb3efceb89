//! Order Track Repository
//!
//! The tracking trail is append-only: inserts happen on the transaction of
//! the transition that caused them, reads serve the timeline views.

use shared::models::OrderTrack;
use sqlx::{SqliteConnection, SqlitePool};

use super::RepoResult;
use crate::db::ids;

const TRACK_SELECT: &str =
    "SELECT track_id, order_id, status, notes, update_date FROM order_track";

/// Append a tracking row for `order_id`, allocating its `T` id on the
/// caller's connection.
pub async fn append(
    conn: &mut SqliteConnection,
    order_id: &str,
    status: &str,
    notes: &str,
) -> RepoResult<String> {
    let track_id = ids::next_track_id(conn).await?;
    sqlx::query(
        "INSERT INTO order_track (track_id, order_id, status, notes, update_date) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&track_id)
    .bind(order_id)
    .bind(status)
    .bind(notes)
    .bind(shared::util::now_millis())
    .execute(&mut *conn)
    .await?;
    Ok(track_id)
}

/// Full timeline for an order, oldest first.
pub async fn find_by_order(pool: &SqlitePool, order_id: &str) -> RepoResult<Vec<OrderTrack>> {
    let sql = format!("{TRACK_SELECT} WHERE order_id = ? ORDER BY update_date, track_id");
    let rows = sqlx::query_as::<_, OrderTrack>(&sql)
        .bind(order_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Most recent tracking entry for an order.
pub async fn latest_for_order(pool: &SqlitePool, order_id: &str) -> RepoResult<Option<OrderTrack>> {
    let sql = format!("{TRACK_SELECT} WHERE order_id = ? ORDER BY update_date DESC, track_id DESC LIMIT 1");
    let row = sqlx::query_as::<_, OrderTrack>(&sql)
        .bind(order_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}
