//! Order Domain
//!
//! - [`cart`] — per-session in-memory carts
//! - [`money`] — decimal arithmetic and the VAT rule
//! - [`placer`] — checkout: cart → persisted order, one transaction
//! - [`tracker`] — status transitions with tracking trail and audit log

pub mod cart;
pub mod money;
pub mod placer;
pub mod tracker;

pub use cart::{Cart, CartLine, CartStore};
pub use placer::{CheckoutRequest, place_order};
