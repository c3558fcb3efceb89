//! API Route Modules
//!
//! One module per resource, each exposing `router()`; handlers stay thin
//! and delegate to repositories and the orders services.

pub mod activity_log;
pub mod cart;
pub mod categories;
pub mod customers;
pub mod health;
pub mod menu;
pub mod orders;
pub mod staff_orders;
pub mod staffs;
pub mod statistics;

use axum::Router;

use crate::core::ServerState;

/// Compose every resource router. Middleware layers are applied by the
/// server on top of this.
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(categories::router())
        .merge(menu::router())
        .merge(customers::router())
        .merge(staffs::router())
        .merge(cart::router())
        .merge(orders::router())
        .merge(staff_orders::router())
        .merge(activity_log::router())
        .merge(statistics::router())
}
