//! Database configuration loaded from environment variables.
//!
//! Every variable is optional. With none set, the program connects exactly
//! like the fixed invocation it replaces:
//! `host=localhost user=postgres password=postgres dbname=postgres port=5432
//! sslmode=disable TimeZone=Asia/Jakarta`.
//!
//! # Environment Variables
//!
//! - `SCHEMASCOPE_DB_HOST` - Server host (default: localhost)
//! - `SCHEMASCOPE_DB_PORT` - Server port (default: 5432)
//! - `SCHEMASCOPE_DB_USER` - Login role (default: postgres)
//! - `SCHEMASCOPE_DB_PASSWORD` - Login password (default: postgres)
//! - `SCHEMASCOPE_DB_NAME` - Database name (default: postgres)
//! - `SCHEMASCOPE_DB_SSLMODE` - `disable`, `allow`, `prefer`, `require`,
//!   `verify-ca` or `verify-full` (default: disable)
//! - `SCHEMASCOPE_DB_TIMEZONE` - Session `TimeZone` (default: Asia/Jakarta)

use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_USER: &str = "postgres";
pub const DEFAULT_PASSWORD: &str = "postgres";
pub const DEFAULT_DBNAME: &str = "postgres";
pub const DEFAULT_TIMEZONE: &str = "Asia/Jakarta";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Connection parameters for the target `PostgreSQL` database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Login role
    pub user: String,
    /// Login password
    pub password: SecretString,
    /// Database name
    pub dbname: String,
    /// TLS mode
    pub ssl_mode: PgSslMode,
    /// Session time zone
    pub timezone: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.to_owned(),
            password: SecretString::from(DEFAULT_PASSWORD),
            dbname: DEFAULT_DBNAME.to_owned(),
            ssl_mode: PgSslMode::Disable,
            timezone: DEFAULT_TIMEZONE.to_owned(),
        }
    }
}

impl DatabaseConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the port or SSL mode cannot be
    /// parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the port or SSL mode cannot be
    /// parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("SCHEMASCOPE_DB_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| {
                ConfigError::InvalidEnvVar("SCHEMASCOPE_DB_PORT".to_owned(), e.to_string())
            })?,
            None => defaults.port,
        };

        let ssl_mode = match lookup("SCHEMASCOPE_DB_SSLMODE") {
            Some(raw) => raw.parse::<PgSslMode>().map_err(|e| {
                ConfigError::InvalidEnvVar("SCHEMASCOPE_DB_SSLMODE".to_owned(), e.to_string())
            })?,
            None => defaults.ssl_mode,
        };

        Ok(Self {
            host: lookup("SCHEMASCOPE_DB_HOST").unwrap_or(defaults.host),
            port,
            user: lookup("SCHEMASCOPE_DB_USER").unwrap_or(defaults.user),
            password: lookup("SCHEMASCOPE_DB_PASSWORD")
                .map_or(defaults.password, SecretString::from),
            dbname: lookup("SCHEMASCOPE_DB_NAME").unwrap_or(defaults.dbname),
            ssl_mode,
            timezone: lookup("SCHEMASCOPE_DB_TIMEZONE").unwrap_or(defaults.timezone),
        })
    }

    /// Connection options for `sqlx`, including the session time zone.
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(self.password.expose_secret())
            .database(&self.dbname)
            .ssl_mode(self.ssl_mode)
            .options([("TimeZone", self.timezone.as_str())])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_fixed_invocation() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.user, "postgres");
        assert_eq!(config.password.expose_secret(), "postgres");
        assert_eq!(config.dbname, "postgres");
        assert!(matches!(config.ssl_mode, PgSslMode::Disable));
        assert_eq!(config.timezone, "Asia/Jakarta");
    }

    #[test]
    fn test_overrides() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[
            ("SCHEMASCOPE_DB_HOST", "db.internal"),
            ("SCHEMASCOPE_DB_PORT", "6543"),
            ("SCHEMASCOPE_DB_USER", "app"),
            ("SCHEMASCOPE_DB_PASSWORD", "s3cr3t"),
            ("SCHEMASCOPE_DB_NAME", "shop"),
            ("SCHEMASCOPE_DB_SSLMODE", "require"),
            ("SCHEMASCOPE_DB_TIMEZONE", "UTC"),
        ]))
        .unwrap();

        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6543);
        assert_eq!(config.user, "app");
        assert_eq!(config.password.expose_secret(), "s3cr3t");
        assert_eq!(config.dbname, "shop");
        assert!(matches!(config.ssl_mode, PgSslMode::Require));
        assert_eq!(config.timezone, "UTC");
    }

    #[test]
    fn test_invalid_port() {
        let result = DatabaseConfig::from_lookup(lookup_from(&[("SCHEMASCOPE_DB_PORT", "abc")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(ref k, _)) if k == "SCHEMASCOPE_DB_PORT"));
    }

    #[test]
    fn test_invalid_ssl_mode() {
        let result =
            DatabaseConfig::from_lookup(lookup_from(&[("SCHEMASCOPE_DB_SSLMODE", "sometimes")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(ref k, _)) if k == "SCHEMASCOPE_DB_SSLMODE"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[(
            "SCHEMASCOPE_DB_PASSWORD",
            "hunter2-very-secret",
        )]))
        .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2-very-secret"));
    }

    #[test]
    fn test_connect_options_carry_target() {
        let options = DatabaseConfig::default().connect_options();
        assert_eq!(options.get_host(), "localhost");
        assert_eq!(options.get_port(), 5432);
        assert_eq!(options.get_username(), "postgres");
        assert_eq!(options.get_database(), Some("postgres"));
    }
}
