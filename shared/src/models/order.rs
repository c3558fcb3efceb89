//! Order Model
//!
//! An order is a committed purchase with a lifecycle status. The status on
//! the order row is denormalized from its tracking trail: every transition
//! rewrites `order_status` and appends an `order_track` row in the same
//! transaction, so the row always mirrors the latest track entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order lifecycle status.
///
/// Legal transitions (enforced, not advisory):
///
/// ```text
/// Pending ──▶ Preparing ──▶ Out for delivery ──▶ Delivered
///    │            │                │
///    └────────────┴────────────────┴──▶ Cancelled
/// ```
///
/// Customers may only cancel while `Pending` and confirm delivery while
/// `Out for delivery`; staff drive the forward transitions and may cancel
/// from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Preparing,
    #[serde(rename = "Out for delivery")]
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// The exact string stored in `orders.order_status` and `order_track.status`.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::OutForDelivery => "Out for delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Terminal states accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether `next` is a legal successor of `self`.
    pub fn can_follow(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Preparing)
                | (Pending, Cancelled)
                | (Preparing, OutForDelivery)
                | (Preparing, Cancelled)
                | (OutForDelivery, Delivered)
                | (OutForDelivery, Cancelled)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(OrderStatus::Pending),
            "Preparing" => Ok(OrderStatus::Preparing),
            "Out for delivery" => Ok(OrderStatus::OutForDelivery),
            "Delivered" => Ok(OrderStatus::Delivered),
            "Cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    /// Null until a staff member accepts the order.
    pub staff_id: Option<String>,
    pub payment_id: String,
    pub address: String,
    /// subtotal + tax + delivery_fee
    pub total_fee: f64,
    pub tax: f64,
    pub delivery_fee: f64,
    pub order_status: String,
    pub order_date: i64,
}

/// Order line entity — immutable once placed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub order_line_id: String,
    pub order_id: String,
    pub menu_id: String,
    pub quantity: i64,
    pub subtotal: f64,
}

/// Order with payment method, for customer order history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderSummary {
    pub order_id: String,
    pub total_fee: f64,
    pub tax: f64,
    pub delivery_fee: f64,
    pub order_status: String,
    pub address: String,
    pub payment_method: String,
    pub order_date: i64,
}

/// Unassigned pending order with customer info and an aggregated item
/// summary, for the staff intake queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PendingOrder {
    pub order_id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub address: String,
    pub total_fee: f64,
    pub delivery_fee: f64,
    pub payment_method: String,
    /// e.g. "Chicken Adobo (2), Garlic Rice (1)"
    pub items: String,
    pub order_date: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("Ready".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn forward_transitions_are_legal() {
        assert!(OrderStatus::Pending.can_follow(OrderStatus::Preparing));
        assert!(OrderStatus::Preparing.can_follow(OrderStatus::OutForDelivery));
        assert!(OrderStatus::OutForDelivery.can_follow(OrderStatus::Delivered));
    }

    #[test]
    fn cancellation_only_before_delivery() {
        assert!(OrderStatus::Pending.can_follow(OrderStatus::Cancelled));
        assert!(OrderStatus::Preparing.can_follow(OrderStatus::Cancelled));
        assert!(OrderStatus::OutForDelivery.can_follow(OrderStatus::Cancelled));
        assert!(!OrderStatus::Delivered.can_follow(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_follow(OrderStatus::Cancelled));
    }

    #[test]
    fn backward_and_skipping_transitions_are_rejected() {
        assert!(!OrderStatus::Preparing.can_follow(OrderStatus::Pending));
        assert!(!OrderStatus::Pending.can_follow(OrderStatus::OutForDelivery));
        assert!(!OrderStatus::Pending.can_follow(OrderStatus::Delivered));
        assert!(!OrderStatus::Delivered.can_follow(OrderStatus::Preparing));
    }

    #[test]
    fn terminal_states() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::OutForDelivery.is_terminal());
    }
}
