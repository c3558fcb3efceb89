//! Cart API Module
//!
//! Carts are addressed by opaque session ids minted at `POST /api/cart`.

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/cart", post(handler::create_session))
        .route(
            "/api/cart/{session}",
            get(handler::summary).delete(handler::clear),
        )
        .route("/api/cart/{session}/items", post(handler::add_item))
        .route(
            "/api/cart/{session}/items/{menu_id}",
            delete(handler::remove_item),
        )
        .route(
            "/api/cart/{session}/items/{menu_id}/increase",
            post(handler::increase_item),
        )
        .route(
            "/api/cart/{session}/items/{menu_id}/decrease",
            post(handler::decrease_item),
        )
}
