//! Order Repository
//!
//! Row-level reads and writes for `orders` and `order_list`. The write
//! helpers take `&mut SqliteConnection` because orders are only ever written
//! inside a larger transaction (placement, status transitions); the guarded
//! status updates live in `orders::tracker`.

use shared::models::{Order, OrderLine, OrderSummary, PendingOrder};
use sqlx::{SqliteConnection, SqlitePool};

use super::RepoResult;

const ORDER_SELECT: &str = "SELECT order_id, customer_id, staff_id, payment_id, address, total_fee, tax, delivery_fee, order_status, order_date FROM orders";

const LINE_SELECT: &str =
    "SELECT order_line_id, order_id, menu_id, quantity, subtotal FROM order_list";

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE order_id = ?");
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Order>> {
    let sql = format!("{ORDER_SELECT} ORDER BY order_date DESC");
    let rows = sqlx::query_as::<_, Order>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_status(pool: &SqlitePool, status: &str) -> RepoResult<Vec<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE order_status = ? ORDER BY order_date DESC");
    let rows = sqlx::query_as::<_, Order>(&sql)
        .bind(status)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_lines(pool: &SqlitePool, order_id: &str) -> RepoResult<Vec<OrderLine>> {
    let sql = format!("{LINE_SELECT} WHERE order_id = ? ORDER BY order_line_id");
    let rows = sqlx::query_as::<_, OrderLine>(&sql)
        .bind(order_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Customer order history, newest first, with the payment method resolved.
pub async fn history_for_customer(
    pool: &SqlitePool,
    customer_id: &str,
) -> RepoResult<Vec<OrderSummary>> {
    let rows = sqlx::query_as::<_, OrderSummary>(
        "SELECT o.order_id, o.total_fee, o.tax, o.delivery_fee, o.order_status, o.address, p.payment_method, o.order_date \
         FROM orders o \
         JOIN payments p ON o.payment_id = p.payment_id \
         WHERE o.customer_id = ? \
         ORDER BY o.order_id DESC",
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Unassigned pending orders for the staff intake queue, with customer info
/// and an aggregated "item (qty)" summary per order.
pub async fn find_pending_unassigned(pool: &SqlitePool) -> RepoResult<Vec<PendingOrder>> {
    let rows = sqlx::query_as::<_, PendingOrder>(
        "SELECT o.order_id, o.customer_id, c.name AS customer_name, o.address, o.total_fee, o.delivery_fee, p.payment_method, \
                GROUP_CONCAT(m.item_name || ' (' || ol.quantity || ')', ', ') AS items, o.order_date \
         FROM orders o \
         JOIN customers c ON o.customer_id = c.customer_id \
         JOIN payments p ON o.payment_id = p.payment_id \
         JOIN order_list ol ON o.order_id = ol.order_id \
         JOIN menu_items m ON ol.menu_id = m.menu_id \
         WHERE o.order_status = 'Pending' AND o.staff_id IS NULL \
         GROUP BY o.order_id \
         ORDER BY o.order_date DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Orders assigned to a staff member that are still in flight (neither
/// delivered nor cancelled).
pub async fn find_active_for_staff(pool: &SqlitePool, staff_id: &str) -> RepoResult<Vec<Order>> {
    let sql = format!(
        "{ORDER_SELECT} WHERE staff_id = ? AND order_status NOT IN ('Delivered', 'Cancelled') ORDER BY order_date DESC"
    );
    let rows = sqlx::query_as::<_, Order>(&sql)
        .bind(staff_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Insert the order row. Placement-transaction only.
pub async fn insert_order(conn: &mut SqliteConnection, order: &Order) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO orders (order_id, customer_id, staff_id, payment_id, address, total_fee, tax, delivery_fee, order_status, order_date) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&order.order_id)
    .bind(&order.customer_id)
    .bind(&order.staff_id)
    .bind(&order.payment_id)
    .bind(&order.address)
    .bind(order.total_fee)
    .bind(order.tax)
    .bind(order.delivery_fee)
    .bind(&order.order_status)
    .bind(order.order_date)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Insert one order line. Placement-transaction only.
pub async fn insert_line(conn: &mut SqliteConnection, line: &OrderLine) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO order_list (order_line_id, order_id, menu_id, quantity, subtotal) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&line.order_line_id)
    .bind(&line.order_id)
    .bind(&line.menu_id)
    .bind(line.quantity)
    .bind(line.subtotal)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Whether an order-line id is already taken.
pub async fn line_id_exists(conn: &mut SqliteConnection, line_id: &str) -> RepoResult<bool> {
    let taken: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM order_list WHERE order_line_id = ?")
            .bind(line_id)
            .fetch_optional(&mut *conn)
            .await?;
    Ok(taken.is_some())
}
