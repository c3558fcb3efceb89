//! Menu Item Repository

use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::ids;

const MENU_SELECT: &str =
    "SELECT menu_id, category_id, item_name, price, is_available FROM menu_items";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<MenuItem>> {
    let sql = format!("{MENU_SELECT} ORDER BY menu_id");
    let rows = sqlx::query_as::<_, MenuItem>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_available(pool: &SqlitePool) -> RepoResult<Vec<MenuItem>> {
    let sql = format!("{MENU_SELECT} WHERE is_available = 1 ORDER BY menu_id");
    let rows = sqlx::query_as::<_, MenuItem>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_category(pool: &SqlitePool, category_id: &str) -> RepoResult<Vec<MenuItem>> {
    let sql = format!("{MENU_SELECT} WHERE category_id = ? ORDER BY menu_id");
    let rows = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(category_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn search(pool: &SqlitePool, query: &str) -> RepoResult<Vec<MenuItem>> {
    let pattern = format!("%{query}%");
    let sql = format!("{MENU_SELECT} WHERE item_name LIKE ? ORDER BY menu_id");
    let rows = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<MenuItem>> {
    let sql = format!("{MENU_SELECT} WHERE menu_id = ?");
    let row = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: MenuItemCreate) -> RepoResult<MenuItem> {
    let category: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM categories WHERE category_id = ?")
            .bind(&data.category_id)
            .fetch_optional(pool)
            .await?;
    if category.is_none() {
        return Err(RepoError::NotFound(format!(
            "Category {} not found",
            data.category_id
        )));
    }

    let mut tx = pool.begin().await?;
    let id = ids::next_menu_id(&mut *tx).await?;
    sqlx::query(
        "INSERT INTO menu_items (menu_id, category_id, item_name, price, is_available) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&data.category_id)
    .bind(&data.item_name)
    .bind(data.price)
    .bind(data.is_available.unwrap_or(true))
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

pub async fn update(pool: &SqlitePool, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
    if let Some(ref category_id) = data.category_id {
        let category: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM categories WHERE category_id = ?")
                .bind(category_id)
                .fetch_optional(pool)
                .await?;
        if category.is_none() {
            return Err(RepoError::NotFound(format!(
                "Category {category_id} not found"
            )));
        }
    }

    let rows = sqlx::query(
        "UPDATE menu_items SET category_id = COALESCE(?1, category_id), item_name = COALESCE(?2, item_name), price = COALESCE(?3, price), is_available = COALESCE(?4, is_available) WHERE menu_id = ?5",
    )
    .bind(&data.category_id)
    .bind(&data.item_name)
    .bind(data.price)
    .bind(data.is_available)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

/// Delete a menu item. Rejected when order lines reference it — ordered
/// history must stay resolvable; flip `is_available` off instead.
pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let ordered: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM order_list WHERE menu_id = ? LIMIT 1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    if ordered.is_some() {
        return Err(RepoError::Validation(
            "Cannot delete a menu item that has been ordered; mark it unavailable instead".into(),
        ));
    }

    let rows = sqlx::query("DELETE FROM menu_items WHERE menu_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;
    use shared::models::CategoryCreate;

    async fn seed_category(pool: &SqlitePool) -> String {
        super::super::category::create(
            pool,
            CategoryCreate {
                category_name: "Mains".into(),
                description: None,
            },
        )
        .await
        .unwrap()
        .category_id
    }

    #[tokio::test]
    async fn menu_ids_are_unpadded() {
        let pool = memory_pool().await;
        let cat = seed_category(&pool).await;

        let first = create(
            &pool,
            MenuItemCreate {
                category_id: cat.clone(),
                item_name: "Chicken Adobo".into(),
                price: 120.0,
                is_available: None,
            },
        )
        .await
        .unwrap();
        let second = create(
            &pool,
            MenuItemCreate {
                category_id: cat,
                item_name: "Garlic Rice".into(),
                price: 35.0,
                is_available: Some(false),
            },
        )
        .await
        .unwrap();

        assert_eq!(first.menu_id, "MENU1");
        assert_eq!(second.menu_id, "MENU2");
        assert!(first.is_available);
        assert!(!second.is_available);
    }

    #[tokio::test]
    async fn search_matches_name_substring() {
        let pool = memory_pool().await;
        let cat = seed_category(&pool).await;
        for name in ["Chicken Adobo", "Pork Adobo", "Halo-Halo"] {
            create(
                &pool,
                MenuItemCreate {
                    category_id: cat.clone(),
                    item_name: name.into(),
                    price: 99.0,
                    is_available: None,
                },
            )
            .await
            .unwrap();
        }

        let hits = search(&pool, "Adobo").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert!(search(&pool, "Sisig").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_requires_existing_category() {
        let pool = memory_pool().await;
        let result = create(
            &pool,
            MenuItemCreate {
                category_id: "CAT99".into(),
                item_name: "Orphan".into(),
                price: 10.0,
                is_available: None,
            },
        )
        .await;
        assert!(matches!(result, Err(RepoError::NotFound(_))));
    }
}
