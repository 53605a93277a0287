//! Schema-qualified table names.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Schema holding application data (orders).
pub const APP_SCHEMA: &str = "app";

/// Schema holding authentication data (users).
pub const AUTH_SCHEMA: &str = "auth";

/// Every schema the program creates, in creation order.
pub const SCHEMAS: [&str; 2] = [APP_SCHEMA, AUTH_SCHEMA];

/// Errors that can occur when parsing a [`QualifiedName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QualifiedNameError {
    /// The input string is empty.
    #[error("table name cannot be empty")]
    Empty,
    /// The input has no `schema.` prefix.
    #[error("table name {0:?} must be qualified as schema.table")]
    MissingSchema(String),
    /// One of the dot-separated parts is empty.
    #[error("table name {0:?} has an empty schema or table part")]
    EmptyPart(String),
    /// The input has more than one dot.
    #[error("table name {0:?} has more than two parts")]
    TooManyParts(String),
}

/// A table name qualified by its schema, such as `auth.user`.
///
/// `Display` prints the plain dotted form. Use [`QualifiedName::to_sql`] when
/// splicing the name into a statement, which double-quotes both parts so
/// reserved words like `user` and `order` are accepted by `PostgreSQL`.
///
/// ```
/// use schemascope_core::QualifiedName;
///
/// let name = QualifiedName::parse("auth.user").unwrap();
/// assert_eq!(name.schema(), "auth");
/// assert_eq!(name.table(), "user");
/// assert_eq!(name.to_sql(), r#""auth"."user""#);
///
/// assert!(QualifiedName::parse("user").is_err());
/// assert!(QualifiedName::parse("a.b.c").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    schema: String,
    table: String,
}

impl QualifiedName {
    /// Build a name from already-separated parts.
    #[must_use]
    pub fn new(schema: &str, table: &str) -> Self {
        Self {
            schema: schema.to_owned(),
            table: table.to_owned(),
        }
    }

    /// Parse a `schema.table` literal.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Has no dot
    /// - Has an empty schema or table part
    /// - Has more than one dot
    pub fn parse(s: &str) -> Result<Self, QualifiedNameError> {
        if s.is_empty() {
            return Err(QualifiedNameError::Empty);
        }

        let mut parts = s.split('.');
        let (Some(schema), Some(table)) = (parts.next(), parts.next()) else {
            return Err(QualifiedNameError::MissingSchema(s.to_owned()));
        };

        if parts.next().is_some() {
            return Err(QualifiedNameError::TooManyParts(s.to_owned()));
        }

        if schema.is_empty() || table.is_empty() {
            return Err(QualifiedNameError::EmptyPart(s.to_owned()));
        }

        Ok(Self::new(schema, table))
    }

    /// Returns the schema part.
    #[must_use]
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Returns the table part.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the quoted form for use inside SQL text.
    #[must_use]
    pub fn to_sql(&self) -> String {
        format!("{}.{}", quote_ident(&self.schema), quote_ident(&self.table))
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

impl std::str::FromStr for QualifiedName {
    type Err = QualifiedNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Double-quote an identifier, doubling any embedded quotes.
#[must_use]
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let name = QualifiedName::parse("app.order").unwrap();
        assert_eq!(name.schema(), "app");
        assert_eq!(name.table(), "order");
        assert_eq!(name, QualifiedName::new(APP_SCHEMA, "order"));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(QualifiedName::parse(""), Err(QualifiedNameError::Empty));
    }

    #[test]
    fn test_parse_unqualified() {
        assert!(matches!(
            QualifiedName::parse("user"),
            Err(QualifiedNameError::MissingSchema(_))
        ));
    }

    #[test]
    fn test_parse_empty_parts() {
        assert!(matches!(
            QualifiedName::parse(".user"),
            Err(QualifiedNameError::EmptyPart(_))
        ));
        assert!(matches!(
            QualifiedName::parse("auth."),
            Err(QualifiedNameError::EmptyPart(_))
        ));
    }

    #[test]
    fn test_parse_too_many_parts() {
        assert!(matches!(
            QualifiedName::parse("db.auth.user"),
            Err(QualifiedNameError::TooManyParts(_))
        ));
    }

    #[test]
    fn test_display_is_unquoted() {
        let name: QualifiedName = "auth.user".parse().unwrap();
        assert_eq!(name.to_string(), "auth.user");
    }

    #[test]
    fn test_to_sql_quotes_reserved_words() {
        let name = QualifiedName::new(AUTH_SCHEMA, "user");
        assert_eq!(name.to_sql(), r#""auth"."user""#);
    }

    #[test]
    fn test_quote_ident_escapes_quotes() {
        assert_eq!(quote_ident(r#"we"ird"#), r#""we""ird""#);
    }

    #[test]
    fn test_schemas_creation_order() {
        assert_eq!(SCHEMAS, ["app", "auth"]);
    }
}
