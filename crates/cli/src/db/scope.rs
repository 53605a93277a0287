//! Table scopes: which physical table a repository reads and writes.
//!
//! Two ways of reaching the same schema-qualified table are supported:
//!
//! - [`ScopeMode::Explicit`] pins repositories to literal names through
//!   [`auth_scope`] and [`app_scope`], overriding whatever the model declares.
//! - [`ScopeMode::Declared`] uses each model's [`Table::qualified_name`].
//!
//! For `User` and `Order` both modes land on `auth.user` and `app.order`.

use core::fmt;

use schemascope_core::{Order, QualifiedName, QualifiedNameError, Table, User};

/// Literal table targeted by [`auth_scope`].
pub const AUTH_USER_TABLE: &str = "auth.user";

/// Literal table targeted by [`app_scope`].
pub const APP_ORDER_TABLE: &str = "app.order";

/// How repositories choose their table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum ScopeMode {
    /// Redirect to literal `schema.table` names.
    #[default]
    Explicit,
    /// Use the table name each model declares.
    Declared,
}

impl fmt::Display for ScopeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit => write!(f, "explicit"),
            Self::Declared => write!(f, "declared"),
        }
    }
}

/// A resolved target table for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableScope {
    table: QualifiedName,
}

impl TableScope {
    /// Scope to a literal `schema.table` name.
    ///
    /// # Errors
    ///
    /// Returns `QualifiedNameError` if `name` is not a two-part dotted name.
    pub fn literal(name: &str) -> Result<Self, QualifiedNameError> {
        Ok(Self {
            table: QualifiedName::parse(name)?,
        })
    }

    /// Scope to the table `T` declares.
    #[must_use]
    pub fn declared<T: Table>() -> Self {
        Self {
            table: T::qualified_name(),
        }
    }

    /// The target table.
    #[must_use]
    pub const fn table(&self) -> &QualifiedName {
        &self.table
    }
}

/// Scope for user queries in explicit mode.
///
/// # Errors
///
/// Returns `QualifiedNameError` if [`AUTH_USER_TABLE`] is malformed.
pub fn auth_scope() -> Result<TableScope, QualifiedNameError> {
    TableScope::literal(AUTH_USER_TABLE)
}

/// Scope for order queries in explicit mode.
///
/// # Errors
///
/// Returns `QualifiedNameError` if [`APP_ORDER_TABLE`] is malformed.
pub fn app_scope() -> Result<TableScope, QualifiedNameError> {
    TableScope::literal(APP_ORDER_TABLE)
}

/// The pair of scopes a run uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scopes {
    /// Where users are read and written.
    pub users: TableScope,
    /// Where orders are read and written.
    pub orders: TableScope,
}

impl Scopes {
    /// Resolve both scopes for `mode`.
    ///
    /// # Errors
    ///
    /// Returns `QualifiedNameError` if an explicit literal is malformed.
    pub fn resolve(mode: ScopeMode) -> Result<Self, QualifiedNameError> {
        match mode {
            ScopeMode::Explicit => Ok(Self {
                users: auth_scope()?,
                orders: app_scope()?,
            }),
            ScopeMode::Declared => Ok(Self {
                users: TableScope::declared::<User>(),
                orders: TableScope::declared::<Order>(),
            }),
        }
    }
}
