//! User repository for database operations.
//!
//! Statements are assembled at runtime because the target table comes from a
//! [`TableScope`] rather than being fixed at compile time.

use sqlx::PgPool;
use tracing::debug;

use schemascope_core::{Table, User, UserId};

use super::{RepositoryError, TableScope};

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
    scope: &'a TableScope,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository targeting `scope`.
    #[must_use]
    pub const fn new(pool: &'a PgPool, scope: &'a TableScope) -> Self {
        Self { pool, scope }
    }

    /// Insert a user and return it with its generated ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, name: &str) -> Result<User, RepositoryError> {
        let sql = format!(
            r#"INSERT INTO {} ("name") VALUES ($1) RETURNING {}"#,
            self.scope.table().to_sql(),
            User::column_list()
        );
        debug!(%sql, "Inserting user");

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(name)
            .fetch_one(self.pool)
            .await?;

        Ok(user)
    }

    /// Get every user, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        let sql = format!(
            r#"SELECT {} FROM {} ORDER BY "id""#,
            User::column_list(),
            self.scope.table().to_sql()
        );
        debug!(%sql, "Fetching users");

        let users = sqlx::query_as::<_, User>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(users)
    }

    /// Get the users whose IDs appear in `ids`, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            r#"SELECT {} FROM {} WHERE "id" = ANY($1) ORDER BY "id""#,
            User::column_list(),
            self.scope.table().to_sql()
        );
        debug!(%sql, count = ids.len(), "Fetching users by id");

        let users = sqlx::query_as::<_, User>(&sql)
            .bind(ids)
            .fetch_all(self.pool)
            .await?;

        Ok(users)
    }
}
