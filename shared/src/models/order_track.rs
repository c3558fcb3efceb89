//! Order Track Model
//!
//! Append-only history of an order's status. One row is written at
//! placement (status "Confirmed") and one per transition afterwards; rows
//! are never updated or deleted.

use serde::{Deserialize, Serialize};

/// Order tracking entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderTrack {
    pub track_id: String,
    pub order_id: String,
    pub status: String,
    pub notes: String,
    pub update_date: i64,
}
