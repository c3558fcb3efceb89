//! Shared domain models and utilities for MunchHub.
//!
//! The `db` feature adds `sqlx::FromRow` derives so the server crate can map
//! rows directly into these structs; API clients depend on the crate without
//! pulling in sqlx.

pub mod models;
pub mod util;

pub use models::order::OrderStatus;
