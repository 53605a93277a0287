//! Order repository for database operations.

use sqlx::PgPool;
use tracing::debug;

use schemascope_core::{Order, OrderWithUser, Table, UserId, attach_users};

use super::{RepositoryError, TableScope, UserRepository};

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
    scope: &'a TableScope,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository targeting `scope`.
    #[must_use]
    pub const fn new(pool: &'a PgPool, scope: &'a TableScope) -> Self {
        Self { pool, scope }
    }

    /// Insert an order owned by `user_id` and return it with its generated ID.
    ///
    /// The owner is not checked; `user_id` is stored as given.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, name: &str, user_id: UserId) -> Result<Order, RepositoryError> {
        let sql = format!(
            r#"INSERT INTO {} ("name", "user_id") VALUES ($1, $2) RETURNING {}"#,
            self.scope.table().to_sql(),
            Order::column_list()
        );
        debug!(%sql, %user_id, "Inserting order");

        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(name)
            .bind(user_id)
            .fetch_one(self.pool)
            .await?;

        Ok(order)
    }

    /// Get every order, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!(
            r#"SELECT {} FROM {} ORDER BY "id""#,
            Order::column_list(),
            self.scope.table().to_sql()
        );
        debug!(%sql, "Fetching orders");

        let orders = sqlx::query_as::<_, Order>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(orders)
    }

    /// Get every order with its owner preloaded from `users`.
    ///
    /// Runs two statements: all orders, then the distinct owners in one
    /// `= ANY($1)` lookup. Orders whose owner is missing get `user: None`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    pub async fn find_all_with_user(
        &self,
        users: &UserRepository<'_>,
    ) -> Result<Vec<OrderWithUser>, RepositoryError> {
        let orders = self.find_all().await?;
        let owners = users.find_by_ids(&Order::owner_ids(&orders)).await?;

        Ok(attach_users(orders, owners))
    }
}
