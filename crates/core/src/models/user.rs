//! User record.

use serde::{Deserialize, Serialize};

use crate::table::{ColumnDef, SqlType, Table};
use crate::types::{AUTH_SCHEMA, UserId};

/// A user row in `auth.user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct User {
    /// Store-generated ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
}

impl Table for User {
    const SCHEMA: &'static str = AUTH_SCHEMA;
    const TABLE: &'static str = "user";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::primary_key("id", SqlType::BigSerial),
        ColumnDef::new("name", SqlType::Text),
    ];
}
