//! MunchHub Server — food-ordering backend
//!
//! # Module structure
//!
//! ```text
//! munch-server/src/
//! ├── core/          # config, state, HTTP server
//! ├── api/           # HTTP routes and handlers
//! ├── orders/        # cart, checkout, status tracking
//! ├── db/            # pool bootstrap, id allocation, repositories
//! └── utils/         # errors, logging, validation
//! ```
//!
//! The `orders` module is the heart of the system: per-session carts feed a
//! single-transaction checkout (`placer`), after which every status change
//! goes through `tracker`, which keeps the denormalized order status and the
//! append-only tracking trail consistent.

pub mod api;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use orders::CartStore;
pub use utils::logger::init_logger;
pub use utils::{AppError, AppResult};
