//! Core types for SchemaScope.
//!
//! This module provides type-safe wrappers for row IDs and table names.

pub mod id;
pub mod name;

pub use id::*;
pub use name::{APP_SCHEMA, AUTH_SCHEMA, QualifiedName, QualifiedNameError, SCHEMAS, quote_ident};
