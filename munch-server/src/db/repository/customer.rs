//! Customer Repository

use shared::models::{Customer, CustomerCreate};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::ids;

const CUSTOMER_SELECT: &str = "SELECT customer_id, name, phone, address FROM customers";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} ORDER BY customer_id");
    let rows = sqlx::query_as::<_, Customer>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE customer_id = ?");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: CustomerCreate) -> RepoResult<Customer> {
    let mut tx = pool.begin().await?;
    let id = ids::next_customer_id(&mut *tx).await?;
    sqlx::query("INSERT INTO customers (customer_id, name, phone, address) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(&data.name)
        .bind(&data.phone)
        .bind(&data.address)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create customer".into()))
}
