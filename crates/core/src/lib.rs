//! SchemaScope Core - Shared model and schema types.
//!
//! This crate provides the types used by the `schemascope` binary and its
//! integration tests:
//! - which schemas exist and how tables inside them are named
//! - the `User` and `Order` records and the tables they map to
//! - the DDL text that auto-migration issues
//!
//! # Architecture
//!
//! The core crate contains only types, traits and SQL text generation - no
//! I/O and no connection handling. Enable the `postgres` feature to get
//! `sqlx` encode/decode for IDs and `FromRow` for the records.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and schema-qualified table names
//! - [`table`] - The `Table` trait, column declarations and DDL builders
//! - [`models`] - `User`, `Order` and the eager-loaded `OrderWithUser`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod table;
pub mod types;

pub use models::*;
pub use table::{ColumnDef, SqlType, Table};
pub use types::*;
