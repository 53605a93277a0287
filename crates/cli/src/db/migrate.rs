//! Schema creation and additive auto-migration.
//!
//! Auto-migration reads `information_schema` for each declared model and
//! brings the live table up to the declared shape:
//!
//! - missing table: `CREATE TABLE IF NOT EXISTS` with every declared column
//! - missing column: `ALTER TABLE .. ADD COLUMN IF NOT EXISTS`
//!
//! Existing columns are never dropped, renamed or retyped.

use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{debug, info};

use schemascope_core::table::{add_column_sql, create_schema_sql, create_table_sql, missing_columns};
use schemascope_core::{Order, QualifiedName, Table, User};

/// Errors that can occur while preparing schemas and tables.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// `CREATE SCHEMA` failed.
    #[error("failed to create schema {schema}: {source}")]
    CreateSchema {
        /// Schema being created.
        schema: String,
        /// Underlying error.
        #[source]
        source: sqlx::Error,
    },

    /// Catalog lookup or DDL for a table failed.
    #[error("failed to migrate table {table}: {source}")]
    Table {
        /// Table being migrated.
        table: QualifiedName,
        /// Underlying error.
        #[source]
        source: sqlx::Error,
    },
}

/// What auto-migration changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Tables that did not exist and were created.
    pub created_tables: Vec<QualifiedName>,
    /// Columns appended to tables that already existed.
    pub added_columns: Vec<(QualifiedName, &'static str)>,
}

impl MigrationReport {
    /// Whether the live schema already matched the declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created_tables.is_empty() && self.added_columns.is_empty()
    }
}

/// Create each schema if it does not exist yet.
///
/// # Errors
///
/// Returns `MigrationError::CreateSchema` for the first schema that fails.
pub async fn create_schemas(pool: &PgPool, schemas: &[&str]) -> Result<(), MigrationError> {
    for schema in schemas {
        let sql = create_schema_sql(schema);
        debug!(%sql, "Creating schema");
        sqlx::query(&sql)
            .execute(pool)
            .await
            .map_err(|source| MigrationError::CreateSchema {
                schema: (*schema).to_owned(),
                source,
            })?;
        info!(schema, "Schema ready");
    }
    Ok(())
}

/// Reconcile `auth.user` and `app.order` with their declared shapes.
///
/// # Errors
///
/// Returns `MigrationError::Table` if a catalog query or DDL statement fails.
pub async fn auto_migrate(pool: &PgPool) -> Result<MigrationReport, MigrationError> {
    let mut report = MigrationReport::default();
    migrate_table::<User>(pool, &mut report).await?;
    migrate_table::<Order>(pool, &mut report).await?;

    if report.is_empty() {
        info!("Tables already match declared models");
    }
    Ok(report)
}

async fn migrate_table<T: Table>(
    pool: &PgPool,
    report: &mut MigrationReport,
) -> Result<(), MigrationError> {
    let name = T::qualified_name();
    let wrap = |source| MigrationError::Table {
        table: name.clone(),
        source,
    };

    if !table_exists(pool, &name).await.map_err(wrap)? {
        let sql = create_table_sql(&name, T::COLUMNS);
        debug!(%sql, "Creating table");
        sqlx::query(&sql).execute(pool).await.map_err(wrap)?;
        info!(table = %name, "Created table");
        report.created_tables.push(name);
        return Ok(());
    }

    let existing = existing_columns(pool, &name).await.map_err(wrap)?;
    for column in missing_columns(T::COLUMNS, &existing) {
        let sql = add_column_sql(&name, column);
        debug!(%sql, "Adding column");
        sqlx::query(&sql).execute(pool).await.map_err(wrap)?;
        info!(table = %name, column = column.name, "Added column");
        report.added_columns.push((name.clone(), column.name));
    }
    Ok(())
}

async fn table_exists(pool: &PgPool, name: &QualifiedName) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        r"
        SELECT EXISTS (
            SELECT 1 FROM information_schema.tables
            WHERE table_schema = $1 AND table_name = $2
        )
        ",
    )
    .bind(name.schema())
    .bind(name.table())
    .fetch_one(pool)
    .await
}

async fn existing_columns(pool: &PgPool, name: &QualifiedName) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(
        r"
        SELECT column_name::text
        FROM information_schema.columns
        WHERE table_schema = $1 AND table_name = $2
        ORDER BY ordinal_position
        ",
    )
    .bind(name.schema())
    .bind(name.table())
    .fetch_all(pool)
    .await
}
