//! Orders API Module (customer-facing)

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/orders", get(handler::list).post(handler::checkout))
        .route("/api/orders/{id}", get(handler::get_by_id))
        .route("/api/orders/{id}/tracks", get(handler::tracks))
        .route("/api/orders/{id}/cancel", post(handler::cancel))
        .route(
            "/api/orders/{id}/confirm-delivery",
            post(handler::confirm_delivery),
        )
}
