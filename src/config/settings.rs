//! Process settings read once from the environment at start-up.

use crate::error::ConfigError;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Connection parameters for the store, plus pool bounds.
#[derive(Clone, Debug)]
pub struct DbSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    /// How long a request waits for a connection before giving up with 503.
    pub acquire_timeout: Duration,
}

impl Default for DbSettings {
    fn default() -> Self {
        DbSettings {
            host: "localhost".into(),
            port: 5432,
            user: "postgres".into(),
            password: String::new(),
            name: "gamestore".into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database: DbSettings,
    pub bind_addr: String,
    /// Create missing tables at start.
    pub init_schema: bool,
}

impl Settings {
    /// Reads DB_HOST, DB_PORT, DB_USER, DB_PASSWORD, DB_NAME, DB_MAX_CONNECTIONS,
    /// DB_ACQUIRE_TIMEOUT_SECS, DB_INIT_SCHEMA and BIND_ADDR.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` but reads through `lookup`, so tests need not touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DbSettings::default();
        let database = DbSettings {
            host: lookup("DB_HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "DB_PORT")?.unwrap_or(defaults.port),
            user: lookup("DB_USER").unwrap_or(defaults.user),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.password),
            name: lookup("DB_NAME").unwrap_or(defaults.name),
            max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS")?.unwrap_or(defaults.max_connections),
            acquire_timeout: parsed(&lookup, "DB_ACQUIRE_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.acquire_timeout),
        };
        Ok(Settings {
            database,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:5000".into()),
            init_schema: parsed(&lookup, "DB_INIT_SCHEMA")?.unwrap_or(true),
        })
    }
}

fn parsed<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}
