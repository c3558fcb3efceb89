//! Payment Method Model
//!
//! A payment row maps a method name ("Cash on delivery", "Debit Card",
//! "Credit Card") to its stable `P`-prefixed id. Rows are created lazily the
//! first time a method is used at checkout.

use serde::{Deserialize, Serialize};

/// Payment method entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Payment {
    pub payment_id: String,
    pub payment_method: String,
}
