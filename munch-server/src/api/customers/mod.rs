//! Customers API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/customers", get(handler::list).post(handler::create))
        .route("/api/customers/{id}", get(handler::get_by_id))
}
