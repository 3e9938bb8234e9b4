use std::{env, str::FromStr};

use anyhow::{Context, bail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Database,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            "database" | "db" => Ok(StorageBackend::Database),
            other => bail!("unknown STORAGE_BACKEND `{other}`, expected `memory` or `database`"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub migrations_dir: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let storage = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StorageBackend::Memory,
        };
        let database_url = env::var("DATABASE_URL").ok();
        let db_max_connections =
            parse_or("DB_MAX_CONNECTIONS", env::var("DB_MAX_CONNECTIONS").ok(), 10)?;
        let migrations_dir =
            env::var("MIGRATIONS_DIR").unwrap_or_else(|_| "migrations".to_string());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_or("APP_PORT", env::var("APP_PORT").ok(), 3000)?;
        Ok(Self {
            storage,
            database_url,
            db_max_connections,
            migrations_dir,
            host,
            port,
        })
    }
}

/// Parses an optional variable, falling back to `default` only when it is unset.
fn parse_or<T>(name: &str, value: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid {name} `{value}`")),
        None => Ok(default),
    }
}
