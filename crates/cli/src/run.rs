//! The single linear pass: schemas, migration, one write pair, three reads.

use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use schemascope_core::{Order, OrderWithUser, QualifiedNameError, SCHEMAS, User};

use crate::db::migrate::{self, MigrationError, MigrationReport};
use crate::db::{OrderRepository, RepositoryError, ScopeMode, Scopes, UserRepository};

/// Name given to the user inserted by every run.
pub const USER_NAME: &str = "John";

/// Name given to the order inserted by every run.
pub const ORDER_NAME: &str = "Order 1";

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Migration(#[from] MigrationError),

    #[error("invalid table scope: {0}")]
    Scope(#[from] QualifiedNameError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Everything one run wrote and read.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Scope mode the run used.
    #[serde(skip)]
    pub mode: ScopeMode,
    /// Changes auto-migration applied.
    pub migration: MigrationReport,
    /// The user inserted by this run.
    pub user: User,
    /// The order inserted by this run.
    pub order: Order,
    /// All users after the insert.
    pub users: Vec<User>,
    /// All orders after the insert.
    pub orders: Vec<Order>,
    /// All orders with their owners attached.
    pub orders_with_user: Vec<OrderWithUser>,
}

/// Execute the full pass against `pool`.
///
/// # Errors
///
/// Returns `RunError` for the first failing step; nothing after it runs.
pub async fn run(pool: &PgPool, mode: ScopeMode) -> Result<RunReport, RunError> {
    migrate::create_schemas(pool, &SCHEMAS).await?;
    let migration = migrate::auto_migrate(pool).await?;

    let scopes = Scopes::resolve(mode)?;
    info!(
        %mode,
        users = %scopes.users.table(),
        orders = %scopes.orders.table(),
        "Resolved table scopes"
    );

    let users = UserRepository::new(pool, &scopes.users);
    let orders = OrderRepository::new(pool, &scopes.orders);

    let user = users.create(USER_NAME).await?;
    info!(user_id = %user.id, name = %user.name, "Created user");

    let order = orders.create(ORDER_NAME, user.id).await?;
    info!(order_id = %order.id, user_id = %order.user_id, "Created order");

    let all_users = users.find_all().await?;
    let all_orders = orders.find_all().await?;
    let orders_with_user = orders.find_all_with_user(&users).await?;
    info!(
        users = all_users.len(),
        orders = all_orders.len(),
        "Fetched result sets"
    );

    Ok(RunReport {
        mode,
        migration,
        user,
        order,
        users: all_users,
        orders: all_orders,
        orders_with_user,
    })
}
