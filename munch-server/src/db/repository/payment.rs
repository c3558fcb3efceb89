//! Payment Method Repository
//!
//! A trivial name → id mapping; rows are created lazily during checkout, on
//! the placement transaction's connection.

use shared::models::Payment;
use sqlx::{SqliteConnection, SqlitePool};

use super::RepoResult;
use crate::db::ids;

const PAYMENT_SELECT: &str = "SELECT payment_id, payment_method FROM payments";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Payment>> {
    let sql = format!("{PAYMENT_SELECT} ORDER BY payment_id");
    let rows = sqlx::query_as::<_, Payment>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// Look up the id for a payment method, inserting a fresh `P`-id row the
/// first time the method is seen.
pub async fn resolve_or_create(conn: &mut SqliteConnection, method: &str) -> RepoResult<String> {
    let existing: Option<String> =
        sqlx::query_scalar("SELECT payment_id FROM payments WHERE payment_method = ? LIMIT 1")
            .bind(method)
            .fetch_optional(&mut *conn)
            .await?;
    if let Some(id) = existing {
        return Ok(id);
    }

    let id = ids::next_payment_id(conn).await?;
    sqlx::query("INSERT INTO payments (payment_id, payment_method) VALUES (?, ?)")
        .bind(&id)
        .bind(method)
        .execute(&mut *conn)
        .await?;
    Ok(id)
}
