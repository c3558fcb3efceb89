//! Order Status Tracking
//!
//! Every transition is one transaction doing up to three writes:
//! a guarded UPDATE of the order's denormalized status, an appended
//! `order_track` row, and — for staff actions — a `staff_activity_log` row.
//! The UPDATE carries the expected current status (and assignment) in its
//! WHERE clause, so a concurrent transition makes it touch zero rows and
//! the whole attempt fails as a conflict instead of double-applying.
//!
//! Transitions outside the legal table are rejected up front with the
//! order's current status in the message; acting on someone else's order is
//! a distinct permission error.

use shared::models::{Order, OrderStatus};
use sqlx::SqlitePool;

use crate::db::repository::{activity_log, order as order_repo, order_track, staff};
use crate::utils::{AppError, AppResult};

async fn load_order(pool: &SqlitePool, order_id: &str) -> AppResult<Order> {
    order_repo::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("order {order_id}")))
}

fn current_status(order: &Order) -> AppResult<OrderStatus> {
    order
        .order_status
        .parse()
        .map_err(|e: String| AppError::internal(e))
}

async fn require_staff(pool: &SqlitePool, staff_id: &str) -> AppResult<()> {
    if staff::find_by_id(pool, staff_id).await?.is_none() {
        return Err(AppError::not_found(format!("staff {staff_id}")));
    }
    Ok(())
}

/// Staff accepts a pending order: assigns themselves and moves it to
/// Preparing.
pub async fn accept_order(
    pool: &SqlitePool,
    order_id: &str,
    staff_id: &str,
    notes: Option<&str>,
) -> AppResult<()> {
    require_staff(pool, staff_id).await?;
    let order = load_order(pool, order_id).await?;
    let current = current_status(&order)?;

    if current != OrderStatus::Pending {
        return Err(AppError::business_rule(format!(
            "order must be Pending to accept, current status: {current}"
        )));
    }

    let mut tx = pool.begin().await?;

    // Precondition in the WHERE clause: a racing accept sees 0 rows
    let rows = sqlx::query(
        "UPDATE orders SET staff_id = ?, order_status = 'Preparing' \
         WHERE order_id = ? AND order_status = 'Pending' AND staff_id IS NULL",
    )
    .bind(staff_id)
    .bind(order_id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(AppError::conflict(format!(
            "order {order_id} was already accepted by another staff member"
        )));
    }

    order_track::append(
        &mut tx,
        order_id,
        OrderStatus::Preparing.as_str(),
        notes.unwrap_or("Order accepted"),
    )
    .await?;
    activity_log::append(
        &mut tx,
        staff_id,
        order_id,
        &order.customer_id,
        "Accepted Order",
        OrderStatus::Preparing.as_str(),
    )
    .await?;

    tx.commit().await?;
    tracing::info!(order_id, staff_id, "Order accepted");
    Ok(())
}

/// Staff moves an order forward (Preparing → Out for delivery → Delivered).
///
/// Cancellation goes through [`cancel_by_staff`]; anything not in the legal
/// table is rejected.
pub async fn update_status(
    pool: &SqlitePool,
    order_id: &str,
    staff_id: &str,
    new_status: OrderStatus,
    notes: Option<&str>,
) -> AppResult<()> {
    require_staff(pool, staff_id).await?;
    let order = load_order(pool, order_id).await?;
    let current = current_status(&order)?;

    match order.staff_id.as_deref() {
        None => {
            return Err(AppError::business_rule(format!(
                "order {order_id} has not been accepted yet"
            )));
        }
        Some(assigned) if assigned != staff_id => {
            return Err(AppError::forbidden(format!(
                "you are not assigned to order {order_id}"
            )));
        }
        Some(_) => {}
    }

    if new_status == OrderStatus::Cancelled || !current.can_follow(new_status) {
        return Err(AppError::business_rule(format!(
            "cannot move order from {current} to {new_status}"
        )));
    }

    let action = format!("Updated order status to {new_status}");
    let mut tx = pool.begin().await?;

    let rows = sqlx::query("UPDATE orders SET order_status = ? WHERE order_id = ? AND order_status = ?")
        .bind(new_status.as_str())
        .bind(order_id)
        .bind(current.as_str())
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(AppError::conflict(format!(
            "order {order_id} status changed concurrently"
        )));
    }

    order_track::append(
        &mut tx,
        order_id,
        new_status.as_str(),
        notes.unwrap_or("Status updated by staff"),
    )
    .await?;
    activity_log::append(
        &mut tx,
        staff_id,
        order_id,
        &order.customer_id,
        &action,
        new_status.as_str(),
    )
    .await?;

    tx.commit().await?;
    tracing::info!(order_id, staff_id, status = %new_status, "Order status updated");
    Ok(())
}

/// Staff cancels a non-terminal order.
pub async fn cancel_by_staff(
    pool: &SqlitePool,
    order_id: &str,
    staff_id: &str,
    notes: Option<&str>,
) -> AppResult<()> {
    require_staff(pool, staff_id).await?;
    let order = load_order(pool, order_id).await?;
    let current = current_status(&order)?;

    if current.is_terminal() {
        return Err(AppError::business_rule(format!(
            "order {order_id} is already {current}"
        )));
    }
    if let Some(assigned) = order.staff_id.as_deref()
        && assigned != staff_id
    {
        return Err(AppError::forbidden(format!(
            "you are not assigned to order {order_id}"
        )));
    }

    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE orders SET order_status = 'Cancelled' WHERE order_id = ? AND order_status = ?",
    )
    .bind(order_id)
    .bind(current.as_str())
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(AppError::conflict(format!(
            "order {order_id} status changed concurrently"
        )));
    }

    order_track::append(
        &mut tx,
        order_id,
        OrderStatus::Cancelled.as_str(),
        notes.unwrap_or("Cancelled by staff"),
    )
    .await?;
    activity_log::append(
        &mut tx,
        staff_id,
        order_id,
        &order.customer_id,
        "Order Cancelled",
        OrderStatus::Cancelled.as_str(),
    )
    .await?;

    tx.commit().await?;
    tracing::info!(order_id, staff_id, "Order cancelled by staff");
    Ok(())
}

/// Customer cancels their own order — only while it is still Pending and
/// unassigned.
pub async fn cancel_by_customer(
    pool: &SqlitePool,
    order_id: &str,
    customer_id: &str,
) -> AppResult<()> {
    let order = load_order(pool, order_id).await?;
    if order.customer_id != customer_id {
        return Err(AppError::forbidden(format!(
            "order {order_id} does not belong to you"
        )));
    }

    let current = current_status(&order)?;
    if current != OrderStatus::Pending {
        return Err(AppError::business_rule(format!(
            "only Pending orders can be cancelled, current status: {current}"
        )));
    }

    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE orders SET order_status = 'Cancelled' \
         WHERE order_id = ? AND order_status = 'Pending' AND staff_id IS NULL",
    )
    .bind(order_id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(AppError::conflict(format!(
            "order {order_id} was accepted while cancelling"
        )));
    }

    order_track::append(
        &mut tx,
        order_id,
        OrderStatus::Cancelled.as_str(),
        "Cancelled by customer",
    )
    .await?;

    tx.commit().await?;
    tracing::info!(order_id, customer_id, "Order cancelled by customer");
    Ok(())
}

/// Customer confirms receipt of an out-for-delivery order. No staff action
/// and no activity-log entry.
pub async fn confirm_delivery(
    pool: &SqlitePool,
    order_id: &str,
    customer_id: &str,
) -> AppResult<()> {
    let order = load_order(pool, order_id).await?;
    if order.customer_id != customer_id {
        return Err(AppError::forbidden(format!(
            "order {order_id} does not belong to you"
        )));
    }

    let current = current_status(&order)?;
    if current != OrderStatus::OutForDelivery {
        return Err(AppError::business_rule(format!(
            "order must be Out for delivery to confirm receipt, current status: {current}"
        )));
    }

    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE orders SET order_status = 'Delivered' \
         WHERE order_id = ? AND order_status = 'Out for delivery'",
    )
    .bind(order_id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(AppError::conflict(format!(
            "order {order_id} status changed concurrently"
        )));
    }

    order_track::append(
        &mut tx,
        order_id,
        OrderStatus::Delivered.as_str(),
        "Confirmed by customer",
    )
    .await?;

    tx.commit().await?;
    tracing::info!(order_id, customer_id, "Delivery confirmed by customer");
    Ok(())
}
