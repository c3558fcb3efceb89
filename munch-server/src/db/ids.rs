//! Sequential business-key allocation
//!
//! MunchHub identifiers are human-readable `<prefix><sequence>` strings
//! (`O007`, `CAT05`, `MENU12`). The next sequence number is derived by
//! scanning the numeric suffixes already in the table and incrementing the
//! maximum — gaps are never refilled, malformed legacy ids are skipped.
//!
//! Allocation takes a `&mut SqliteConnection` so callers run the scan, the
//! collision re-check and the subsequent INSERT on the same connection —
//! inside one write transaction for multi-row operations. SQLite serializes
//! writers, which closes the scan-then-insert race between concurrent
//! checkouts; the primary-key constraint and the bounded re-check below turn
//! any residual collision into a clean rejection instead of an overwrite.

use sqlx::SqliteConnection;

use super::repository::{RepoError, RepoResult};

/// Upper bound on collision re-checks before giving up.
const MAX_ID_ATTEMPTS: u64 = 100;

/// Order-line ids (`O{orderNum}L{lineIndex}`) must fit in 5 characters.
pub const MAX_ORDER_LINE_ID_LEN: usize = 5;

/// Parse the numeric suffix of `id`, returning `None` for ids that do not
/// start with `prefix` or whose remainder is not a plain number.
fn parse_suffix(id: &str, prefix: &str) -> Option<u64> {
    let rest = id.strip_prefix(prefix)?;
    if rest.is_empty() {
        return None;
    }
    rest.parse().ok()
}

/// Render `prefix` + `n`, left-padding the number with zeros to at least
/// `pad` digits. Padding is a minimum, not a cap: `format_id("C", 1000, 3)`
/// is `C1000`.
fn format_id(prefix: &str, n: u64, pad: usize) -> String {
    format!("{prefix}{n:0pad$}")
}

/// Allocate the next id for `table.column`.
///
/// Scans existing ids for the highest numeric suffix, then probes candidates
/// starting at max+1 until one is free (bounded by [`MAX_ID_ATTEMPTS`]).
pub async fn next_id(
    conn: &mut SqliteConnection,
    table: &str,
    column: &str,
    prefix: &str,
    pad: usize,
) -> RepoResult<String> {
    let existing: Vec<String> = sqlx::query_scalar(&format!("SELECT {column} FROM {table}"))
        .fetch_all(&mut *conn)
        .await?;

    let max = existing
        .iter()
        .filter_map(|id| parse_suffix(id, prefix))
        .max()
        .unwrap_or(0);

    let mut n = max + 1;
    for _ in 0..MAX_ID_ATTEMPTS {
        let candidate = format_id(prefix, n, pad);
        let taken: Option<i64> =
            sqlx::query_scalar(&format!("SELECT 1 FROM {table} WHERE {column} = ?"))
                .bind(&candidate)
                .fetch_optional(&mut *conn)
                .await?;
        if taken.is_none() {
            return Ok(candidate);
        }
        tracing::warn!(
            "Generated id {candidate} for {table} already exists, trying next"
        );
        n += 1;
    }

    Err(RepoError::Database(format!(
        "no free {prefix} id for {table} after {MAX_ID_ATTEMPTS} attempts"
    )))
}

// ── Per-entity allocators ───────────────────────────────────────────

pub async fn next_order_id(conn: &mut SqliteConnection) -> RepoResult<String> {
    next_id(conn, "orders", "order_id", "O", 3).await
}

pub async fn next_payment_id(conn: &mut SqliteConnection) -> RepoResult<String> {
    next_id(conn, "payments", "payment_id", "P", 3).await
}

pub async fn next_track_id(conn: &mut SqliteConnection) -> RepoResult<String> {
    next_id(conn, "order_track", "track_id", "T", 3).await
}

pub async fn next_log_id(conn: &mut SqliteConnection) -> RepoResult<String> {
    next_id(conn, "staff_activity_log", "log_id", "L", 3).await
}

pub async fn next_category_id(conn: &mut SqliteConnection) -> RepoResult<String> {
    next_id(conn, "categories", "category_id", "CAT", 2).await
}

pub async fn next_menu_id(conn: &mut SqliteConnection) -> RepoResult<String> {
    next_id(conn, "menu_items", "menu_id", "MENU", 0).await
}

pub async fn next_customer_id(conn: &mut SqliteConnection) -> RepoResult<String> {
    next_id(conn, "customers", "customer_id", "C", 3).await
}

pub async fn next_staff_id(conn: &mut SqliteConnection) -> RepoResult<String> {
    next_id(conn, "staffs", "staff_id", "S", 3).await
}

// ── Order-line ids ──────────────────────────────────────────────────

/// Build the id for line `index` (1-based) of `order_id`.
///
/// Format is `O{orderNum}L{index}` with the order number unpadded
/// (`O007` → `O7L1`). Ids longer than [`MAX_ORDER_LINE_ID_LEN`] are an
/// explicit error — the schema caps the column at 5 characters and
/// truncation would collide silently.
pub fn line_id(order_id: &str, index: usize) -> RepoResult<String> {
    let order_num = parse_suffix(order_id, "O").ok_or_else(|| {
        RepoError::Validation(format!("malformed order id: {order_id}"))
    })?;
    let id = format!("O{order_num}L{index}");
    if id.len() > MAX_ORDER_LINE_ID_LEN {
        return Err(RepoError::Validation(format!(
            "order line id '{id}' exceeds {MAX_ORDER_LINE_ID_LEN} characters — order number or line count too large"
        )));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;

    #[test]
    fn parse_suffix_handles_padding_and_garbage() {
        assert_eq!(parse_suffix("O007", "O"), Some(7));
        assert_eq!(parse_suffix("MENU12", "MENU"), Some(12));
        assert_eq!(parse_suffix("C1000", "C"), Some(1000));
        assert_eq!(parse_suffix("LEGACY", "O"), None);
        assert_eq!(parse_suffix("O", "O"), None);
        assert_eq!(parse_suffix("O12X", "O"), None);
        assert_eq!(parse_suffix("CAT05", "O"), None);
    }

    #[test]
    fn format_id_pads_to_minimum_width() {
        assert_eq!(format_id("O", 7, 3), "O007");
        assert_eq!(format_id("CAT", 5, 2), "CAT05");
        assert_eq!(format_id("MENU", 12, 0), "MENU12");
        assert_eq!(format_id("C", 1000, 3), "C1000");
    }

    #[test]
    fn line_id_format_and_length_cap() {
        assert_eq!(line_id("O001", 1).unwrap(), "O1L1");
        assert_eq!(line_id("O007", 3).unwrap(), "O7L3");
        assert_eq!(line_id("O012", 9).unwrap(), "O12L9");
        // O100L10 is 7 chars — must fail, never truncate
        assert!(line_id("O100", 10).is_err());
        assert!(line_id("O1000", 1).is_err());
        assert!(line_id("MENU1", 1).is_err());
    }

    #[tokio::test]
    async fn next_id_increments_past_the_max_ignoring_gaps() {
        let pool = memory_pool().await;
        for id in ["CAT01", "CAT02", "CAT05"] {
            sqlx::query("INSERT INTO categories (category_id, category_name) VALUES (?, ?)")
                .bind(id)
                .bind(format!("cat-{id}"))
                .execute(&pool)
                .await
                .unwrap();
        }

        let mut conn = pool.acquire().await.unwrap();
        let next = next_category_id(&mut conn).await.unwrap();
        assert_eq!(next, "CAT06");
    }

    #[tokio::test]
    async fn next_id_skips_malformed_legacy_ids() {
        let pool = memory_pool().await;
        sqlx::query("INSERT INTO categories (category_id, category_name) VALUES ('CAT01', 'x')")
            .execute(&pool)
            .await
            .unwrap();
        for (id, name) in [("MENU3", "a"), ("ITEM9", "b"), ("MENUX", "c")] {
            sqlx::query(
                "INSERT INTO menu_items (menu_id, category_id, item_name, price) VALUES (?, 'CAT01', ?, 10.0)",
            )
            .bind(id)
            .bind(name)
            .execute(&pool)
            .await
            .unwrap();
        }

        let mut conn = pool.acquire().await.unwrap();
        // ITEM9 and MENUX carry no parsable MENU suffix; max is MENU3
        let next = next_menu_id(&mut conn).await.unwrap();
        assert_eq!(next, "MENU4");
    }

    #[tokio::test]
    async fn first_id_of_an_empty_table_starts_at_one() {
        let pool = memory_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        assert_eq!(next_order_id(&mut conn).await.unwrap(), "O001");
        assert_eq!(next_category_id(&mut conn).await.unwrap(), "CAT01");
        assert_eq!(next_menu_id(&mut conn).await.unwrap(), "MENU1");
    }

    #[tokio::test]
    async fn padded_sequences_keep_growing_past_the_pad_width() {
        let pool = memory_pool().await;
        sqlx::query("INSERT INTO customers (customer_id, name) VALUES ('C999', 'edge')")
            .execute(&pool)
            .await
            .unwrap();

        let mut conn = pool.acquire().await.unwrap();
        assert_eq!(next_customer_id(&mut conn).await.unwrap(), "C1000");
    }
}
