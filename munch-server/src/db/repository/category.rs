//! Category Repository

use shared::models::{Category, CategoryCreate, CategoryUpdate};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::ids;

const CATEGORY_SELECT: &str = "SELECT category_id, category_name, description FROM categories";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let sql = format!("{CATEGORY_SELECT} ORDER BY category_id");
    let rows = sqlx::query_as::<_, Category>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Category>> {
    let sql = format!("{CATEGORY_SELECT} WHERE category_id = ?");
    let row = sqlx::query_as::<_, Category>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Category>> {
    let sql = format!("{CATEGORY_SELECT} WHERE category_name = ?");
    let row = sqlx::query_as::<_, Category>(&sql)
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: CategoryCreate) -> RepoResult<Category> {
    if find_by_name(pool, &data.category_name).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Category '{}' already exists",
            data.category_name
        )));
    }

    // Id allocation and insert share one write transaction
    let mut tx = pool.begin().await?;
    let id = ids::next_category_id(&mut *tx).await?;
    sqlx::query("INSERT INTO categories (category_id, category_name, description) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(&data.category_name)
        .bind(&data.description)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

pub async fn update(pool: &SqlitePool, id: &str, data: CategoryUpdate) -> RepoResult<Category> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))?;

    if let Some(ref new_name) = data.category_name
        && new_name != &existing.category_name
        && find_by_name(pool, new_name).await?.is_some()
    {
        return Err(RepoError::Duplicate(format!(
            "Category '{new_name}' already exists"
        )));
    }

    sqlx::query(
        "UPDATE categories SET category_name = COALESCE(?1, category_name), description = COALESCE(?2, description) WHERE category_id = ?3",
    )
    .bind(&data.category_name)
    .bind(&data.description)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

/// Delete a category. Rejected while menu items still reference it.
pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let in_use: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM menu_items WHERE category_id = ? LIMIT 1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    if in_use.is_some() {
        return Err(RepoError::Validation(
            "Cannot delete category with menu items".into(),
        ));
    }

    let rows = sqlx::query("DELETE FROM categories WHERE category_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
