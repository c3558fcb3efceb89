//! Order Placement
//!
//! Checkout turns a session cart into a persisted order. Everything after
//! pre-flight validation happens in one write transaction: id allocation,
//! payment resolution, the order row, every order line, and the initial
//! tracking entry. Any failure rolls the whole thing back and leaves the
//! cart untouched for retry; the cart is cleared only after commit.

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::models::{Order, OrderLine, OrderStatus};
use sqlx::SqlitePool;

use super::cart::CartStore;
use super::money::{round_money, tax_for, to_decimal, to_f64};
use crate::db::ids;
use crate::db::repository::{RepoError, customer, order as order_repo, order_track, payment};
use crate::utils::validation::{validate_address, validate_card_number};
use crate::utils::{AppError, AppResult};

/// Accepted payment methods. Card methods require a card number.
pub const PAYMENT_METHODS: [&str; 3] = ["Cash on delivery", "Debit Card", "Credit Card"];

/// Note on the tracking entry written at placement.
const PLACEMENT_NOTE: &str = "Order placed successfully";

/// Checkout payload
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub session_id: String,
    pub customer_id: String,
    pub address: String,
    pub payment_method: String,
    pub card_number: Option<String>,
}

fn validate_payment_method(req: &CheckoutRequest) -> AppResult<()> {
    if !PAYMENT_METHODS.contains(&req.payment_method.as_str()) {
        return Err(AppError::validation(format!(
            "unknown payment method '{}'",
            req.payment_method
        )));
    }
    if req.payment_method != "Cash on delivery" {
        let card = req
            .card_number
            .as_deref()
            .ok_or_else(|| AppError::validation("card number is required for card payments"))?;
        validate_card_number(card)?;
    }
    Ok(())
}

/// Place an order from the session's cart.
///
/// Returns the new order id. On success the cart is cleared; on any error
/// the transaction rolls back and the cart is preserved.
pub async fn place_order(
    pool: &SqlitePool,
    carts: &CartStore,
    req: &CheckoutRequest,
) -> AppResult<String> {
    // Pre-flight: reject before touching the database
    validate_address(&req.address)?;
    validate_payment_method(req)?;

    let cart = carts
        .snapshot(&req.session_id)
        .ok_or_else(|| AppError::not_found(format!("cart session {}", req.session_id)))?;
    if cart.is_empty() {
        return Err(AppError::validation("cart is empty"));
    }

    if customer::find_by_id(pool, &req.customer_id).await?.is_none() {
        return Err(AppError::not_found(format!(
            "customer {}",
            req.customer_id
        )));
    }

    let subtotal: Decimal = cart.lines().iter().map(|l| to_decimal(l.subtotal)).sum();
    let tax = tax_for(subtotal);
    let delivery_fee = to_decimal(cart.delivery_fee);
    let total_fee = round_money(subtotal + tax + delivery_fee);

    let mut tx = pool.begin().await?;

    let order_id = ids::next_order_id(&mut *tx).await?;
    let payment_id = payment::resolve_or_create(&mut *tx, &req.payment_method).await?;

    order_repo::insert_order(
        &mut tx,
        &Order {
            order_id: order_id.clone(),
            customer_id: req.customer_id.clone(),
            staff_id: None,
            payment_id,
            address: req.address.trim().to_string(),
            total_fee: to_f64(total_fee),
            tax: to_f64(tax),
            delivery_fee: cart.delivery_fee,
            order_status: OrderStatus::Pending.as_str().to_string(),
            order_date: shared::util::now_millis(),
        },
    )
    .await?;

    for (i, line) in cart.lines().iter().enumerate() {
        // Line ids are capped at 5 chars; overflowing is a hard abort, the
        // id must never be truncated into a colliding one
        let order_line_id = ids::line_id(&order_id, i + 1).map_err(|e| match e {
            RepoError::Validation(msg) => AppError::business_rule(msg),
            other => AppError::from(other),
        })?;

        if order_repo::line_id_exists(&mut tx, &order_line_id).await? {
            return Err(AppError::conflict(format!(
                "order line id '{order_line_id}' already exists"
            )));
        }

        order_repo::insert_line(
            &mut tx,
            &OrderLine {
                order_line_id,
                order_id: order_id.clone(),
                menu_id: line.menu_id.clone(),
                quantity: line.quantity,
                subtotal: line.subtotal,
            },
        )
        .await?;
    }

    order_track::append(&mut tx, &order_id, "Confirmed", PLACEMENT_NOTE).await?;

    tx.commit().await?;

    carts.clear(&req.session_id);
    tracing::info!(
        order_id = %order_id,
        customer_id = %req.customer_id,
        subtotal = to_f64(subtotal),
        tax = to_f64(tax),
        total = to_f64(total_fee),
        "Order placed"
    );

    Ok(order_id)
}
