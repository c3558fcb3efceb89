//! Staff Repository

use shared::models::{Staff, StaffCreate};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::ids;

const STAFF_SELECT: &str = "SELECT staff_id, name FROM staffs";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Staff>> {
    let sql = format!("{STAFF_SELECT} ORDER BY staff_id");
    let rows = sqlx::query_as::<_, Staff>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Staff>> {
    let sql = format!("{STAFF_SELECT} WHERE staff_id = ?");
    let row = sqlx::query_as::<_, Staff>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: StaffCreate) -> RepoResult<Staff> {
    let mut tx = pool.begin().await?;
    let id = ids::next_staff_id(&mut *tx).await?;
    sqlx::query("INSERT INTO staffs (staff_id, name) VALUES (?, ?)")
        .bind(&id)
        .bind(&data.name)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create staff".into()))
}
