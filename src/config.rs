//! Environment-driven runtime configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable holds a value that cannot be parsed.
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Offending value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A variable required by the selected options is not set.
    #[error("{key} must be set when {required_by}")]
    Missing {
        /// Variable name.
        key: &'static str,
        /// The option that requires it.
        required_by: &'static str,
    },
}

/// Where lists and users are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Process-local maps; data is lost on exit.
    #[default]
    InMemory,
    /// `PostgreSQL` via `DATABASE_URL`.
    Postgres,
}

impl FromStr for StorageMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" | "in_memory" | "inmemory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err("expected `memory` or `postgres`".to_owned()),
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err("expected `text` or `json`".to_owned()),
        }
    }
}

/// Settings for the `todo-api` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Socket the server binds to.
    pub bind_address: SocketAddr,
    /// Storage backend.
    pub storage: StorageMode,
    /// `PostgreSQL` connection URL; set whenever `storage` is `Postgres`.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_size: u32,
    /// Per-request deadline.
    pub request_timeout: Duration,
    /// Log line format.
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is malformed or
    /// `DATABASE_URL` is missing for `postgres` storage.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps variable names to
    /// values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is malformed or
    /// `DATABASE_URL` is missing for `postgres` storage.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse_or(&lookup, "TODO_API_HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;
        let port = parse_or(&lookup, "TODO_API_PORT", DEFAULT_PORT)?;
        let storage = parse_or(&lookup, "TODO_API_STORAGE", StorageMode::default())?;
        let pool_size = parse_or(&lookup, "TODO_API_DB_POOL_SIZE", DEFAULT_POOL_SIZE)?;
        let timeout_secs = parse_or(
            &lookup,
            "TODO_API_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        let log_format = parse_or(&lookup, "TODO_API_LOG_FORMAT", LogFormat::default())?;

        if pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "TODO_API_DB_POOL_SIZE",
                value: pool_size.to_string(),
                reason: "must be at least 1".to_owned(),
            });
        }

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if storage == StorageMode::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing {
                key: "DATABASE_URL",
                required_by: "TODO_API_STORAGE=postgres",
            });
        }

        Ok(Self {
            bind_address: SocketAddr::new(host, port),
            storage,
            database_url,
            pool_size,
            request_timeout: Duration::from_secs(timeout_secs),
            log_format,
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|raw| !raw.trim().is_empty())
        .map_or(Ok(default), |raw| {
            raw.trim()
                .parse()
                .map_err(|err: T::Err| ConfigError::InvalidValue {
                    key,
                    value: raw.clone(),
                    reason: err.to_string(),
                })
        })
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, LogFormat, StorageMode};
    use rstest::rstest;
    use std::collections::HashMap;
    use std::time::Duration;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).expect("defaults are valid");

        assert_eq!(config.bind_address.to_string(), "0.0.0.0:8080");
        assert_eq!(config.storage, StorageMode::InMemory);
        assert_eq!(config.database_url, None);
        assert_eq!(config.pool_size, 10);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[rstest]
    fn explicit_values_override_defaults() {
        let config = config_from(&[
            ("TODO_API_HOST", "127.0.0.1"),
            ("TODO_API_PORT", "3000"),
            ("TODO_API_STORAGE", "postgres"),
            ("DATABASE_URL", "postgres://localhost/todo"),
            ("TODO_API_DB_POOL_SIZE", "4"),
            ("TODO_API_REQUEST_TIMEOUT_SECS", "5"),
            ("TODO_API_LOG_FORMAT", "JSON"),
        ])
        .expect("configuration is valid");

        assert_eq!(config.bind_address.to_string(), "127.0.0.1:3000");
        assert_eq!(config.storage, StorageMode::Postgres);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/todo")
        );
        assert_eq!(config.pool_size, 4);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[rstest]
    fn postgres_requires_a_database_url() {
        assert_eq!(
            config_from(&[("TODO_API_STORAGE", "postgres")]),
            Err(ConfigError::Missing {
                key: "DATABASE_URL",
                required_by: "TODO_API_STORAGE=postgres",
            })
        );
    }

    #[rstest]
    #[case("TODO_API_PORT", "eighty")]
    #[case("TODO_API_STORAGE", "redis")]
    #[case("TODO_API_LOG_FORMAT", "xml")]
    #[case("TODO_API_DB_POOL_SIZE", "0")]
    #[case("TODO_API_HOST", "not-an-ip")]
    fn malformed_values_are_rejected(#[case] key: &str, #[case] value: &str) {
        let result = config_from(&[(key, value)]);
        assert!(
            matches!(result, Err(ConfigError::InvalidValue { key: rejected, .. }) if rejected == key),
            "unexpected result: {result:?}"
        );
    }
}
