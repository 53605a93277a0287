//! Database operations against the `app` and `auth` schemas.
//!
//! ## Tables
//!
//! - `auth.user` - [`User`](schemascope_core::User) rows
//! - `app.order` - [`Order`](schemascope_core::Order) rows, owned by a user via `user_id`
//!
//! Both tables are created by [`migrate::auto_migrate`] from the declarations
//! in `schemascope-core`; there are no migration files.

pub mod migrate;
pub mod orders;
pub mod scope;
pub mod users;

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::config::DatabaseConfig;

pub use orders::OrderRepository;
pub use scope::{ScopeMode, Scopes, TableScope};
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Open the single-connection pool the whole run shares.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(config.connect_options())
        .await
}
