//! Repository Module
//!
//! CRUD and query operations, one module per table. Repositories are free
//! async functions over `&SqlitePool` (or `&mut SqliteConnection` for the
//! pieces that participate in a caller's transaction).

pub mod activity_log;
pub mod category;
pub mod customer;
pub mod menu_item;
pub mod order;
pub mod order_track;
pub mod payment;
pub mod staff;
pub mod statistics;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
