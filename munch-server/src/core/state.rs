use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::orders::CartStore;
use crate::utils::AppError;

/// Shared server state.
///
/// Cloned per request by axum; all fields are cheap to clone (the pool and
/// the cart store are handles over shared data).
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration (immutable after startup)
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Per-session in-memory carts
    pub carts: CartStore,
}

impl ServerState {
    /// Initialize state: open the database (running migrations) and create
    /// an empty cart store.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self {
            config: config.clone(),
            pool: db.pool,
            carts: CartStore::new(config.delivery_fee),
        })
    }
}
