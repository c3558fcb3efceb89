//! Staffs API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/staffs", get(handler::list).post(handler::create))
}
