//! Declared table shapes and the DDL derived from them.
//!
//! Each model implements [`Table`] to state where it lives and which columns
//! it expects. Auto-migration compares these declarations against the live
//! catalog and only ever adds: missing tables are created, missing columns
//! are appended, nothing is dropped or retyped.

use crate::types::{QualifiedName, quote_ident};

/// Column types used by the declared models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    /// Auto-incrementing 64-bit integer.
    BigSerial,
    /// 64-bit integer.
    BigInt,
    /// Unbounded text.
    Text,
}

impl SqlType {
    /// Returns the `PostgreSQL` spelling of the type.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::BigSerial => "BIGSERIAL",
            Self::BigInt => "BIGINT",
            Self::Text => "TEXT",
        }
    }
}

/// A single declared column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnDef {
    /// Column name as stored in the catalog.
    pub name: &'static str,
    /// Column type.
    pub sql_type: SqlType,
    /// Whether the column is the primary key.
    pub primary_key: bool,
}

impl ColumnDef {
    /// Declare a regular column.
    #[must_use]
    pub const fn new(name: &'static str, sql_type: SqlType) -> Self {
        Self {
            name,
            sql_type,
            primary_key: false,
        }
    }

    /// Declare the primary key column.
    #[must_use]
    pub const fn primary_key(name: &'static str, sql_type: SqlType) -> Self {
        Self {
            name,
            sql_type,
            primary_key: true,
        }
    }

    /// Returns the column definition fragment used in `CREATE`/`ALTER`.
    #[must_use]
    pub fn definition(&self) -> String {
        let mut def = format!("{} {}", quote_ident(self.name), self.sql_type.as_sql());
        if self.primary_key {
            def.push_str(" PRIMARY KEY");
        }
        def
    }
}

/// A record type mapped to a schema-qualified table.
pub trait Table {
    /// Schema the table lives in.
    const SCHEMA: &'static str;

    /// Table name within the schema.
    const TABLE: &'static str;

    /// Declared columns, in declaration order.
    const COLUMNS: &'static [ColumnDef];

    /// Returns the declared `schema.table` name.
    fn qualified_name() -> QualifiedName {
        QualifiedName::new(Self::SCHEMA, Self::TABLE)
    }

    /// Returns the quoted, comma-separated column list for `SELECT`/`RETURNING`.
    fn column_list() -> String {
        Self::COLUMNS
            .iter()
            .map(|c| quote_ident(c.name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// `CREATE SCHEMA IF NOT EXISTS` for one schema.
#[must_use]
pub fn create_schema_sql(schema: &str) -> String {
    format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema))
}

/// `CREATE TABLE IF NOT EXISTS` with every declared column.
#[must_use]
pub fn create_table_sql(name: &QualifiedName, columns: &[ColumnDef]) -> String {
    let defs = columns
        .iter()
        .map(ColumnDef::definition)
        .collect::<Vec<_>>()
        .join(", ");
    format!("CREATE TABLE IF NOT EXISTS {} ({defs})", name.to_sql())
}

/// `ALTER TABLE .. ADD COLUMN IF NOT EXISTS` for one column.
#[must_use]
pub fn add_column_sql(name: &QualifiedName, column: &ColumnDef) -> String {
    format!(
        "ALTER TABLE {} ADD COLUMN IF NOT EXISTS {}",
        name.to_sql(),
        column.definition()
    )
}

/// Declared columns absent from `existing`, in declaration order.
#[must_use]
pub fn missing_columns<'a, S: AsRef<str>>(
    declared: &'a [ColumnDef],
    existing: &[S],
) -> Vec<&'a ColumnDef> {
    declared
        .iter()
        .filter(|c| !existing.iter().any(|e| e.as_ref() == c.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[ColumnDef] = &[
        ColumnDef::primary_key("id", SqlType::BigSerial),
        ColumnDef::new("name", SqlType::Text),
        ColumnDef::new("user_id", SqlType::BigInt),
    ];

    struct Widget;

    impl Table for Widget {
        const SCHEMA: &'static str = "app";
        const TABLE: &'static str = "widget";
        const COLUMNS: &'static [ColumnDef] = COLUMNS;
    }

    #[test]
    fn test_create_schema_sql() {
        assert_eq!(
            create_schema_sql("auth"),
            r#"CREATE SCHEMA IF NOT EXISTS "auth""#
        );
    }

    #[test]
    fn test_create_table_sql() {
        let sql = create_table_sql(&Widget::qualified_name(), Widget::COLUMNS);
        assert_eq!(
            sql,
            r#"CREATE TABLE IF NOT EXISTS "app"."widget" ("id" BIGSERIAL PRIMARY KEY, "name" TEXT, "user_id" BIGINT)"#
        );
    }

    #[test]
    fn test_add_column_sql() {
        let sql = add_column_sql(
            &Widget::qualified_name(),
            &ColumnDef::new("name", SqlType::Text),
        );
        assert_eq!(
            sql,
            r#"ALTER TABLE "app"."widget" ADD COLUMN IF NOT EXISTS "name" TEXT"#
        );
    }

    #[test]
    fn test_column_list() {
        assert_eq!(Widget::column_list(), r#""id", "name", "user_id""#);
    }

    #[test]
    fn test_missing_columns_none_when_all_present() {
        let existing = ["user_id", "id", "name", "extra"];
        assert!(missing_columns(COLUMNS, &existing).is_empty());
    }

    #[test]
    fn test_missing_columns_keeps_declaration_order() {
        let existing = vec!["name".to_owned()];
        let missing: Vec<_> = missing_columns(COLUMNS, &existing)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(missing, vec!["id", "user_id"]);
    }

    #[test]
    fn test_missing_columns_all_when_table_empty() {
        let existing: [&str; 0] = [];
        assert_eq!(missing_columns(COLUMNS, &existing).len(), 3);
    }
}
