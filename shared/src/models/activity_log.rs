//! Staff Activity Log Model
//!
//! Append-only audit trail of staff actions against orders.

use serde::{Deserialize, Serialize};

/// Staff activity log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ActivityLog {
    pub log_id: String,
    pub staff_id: String,
    pub order_id: String,
    pub customer_id: String,
    pub action: String,
    pub status: String,
    pub activity_date: i64,
}

/// Activity log entry with staff and customer names resolved, for list views.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ActivityLogView {
    pub log_id: String,
    pub staff_id: String,
    pub staff_name: String,
    pub order_id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub action: String,
    pub status: String,
    pub activity_date: i64,
}
