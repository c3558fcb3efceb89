//! Staff Orders API Module
//!
//! The staff side of the order lifecycle: the pending intake queue, accept,
//! forward status updates, and cancellation.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/staff-orders/pending", get(handler::pending))
        .route("/api/staff-orders/active", get(handler::active))
        .route("/api/staff-orders/{id}/accept", post(handler::accept))
        .route("/api/staff-orders/{id}/status", post(handler::update_status))
        .route("/api/staff-orders/{id}/cancel", post(handler::cancel))
}
