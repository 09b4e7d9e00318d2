use std::env;
use std::str::FromStr;

/// Which persistence backend the API runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(anyhow::anyhow!("Unknown STORE_BACKEND: {s}")),
        }
    }
}

/// Resolved backend settings. Postgres always carries its connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Postgres { database_url: String },
    Memory,
}

impl StoreConfig {
    pub fn resolve(backend: StoreBackend, database_url: Option<String>) -> anyhow::Result<Self> {
        match (backend, database_url.filter(|url| !url.is_empty())) {
            (StoreBackend::Postgres, Some(database_url)) => Ok(Self::Postgres { database_url }),
            (StoreBackend::Postgres, None) => {
                Err(anyhow::anyhow!("Missing required env var: DATABASE_URL"))
            }
            (StoreBackend::Memory, _) => Ok(Self::Memory),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreConfig,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub app_base_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let store_backend: StoreBackend = env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "postgres".into())
            .parse()?;

        let store = StoreConfig::resolve(store_backend, env::var("DATABASE_URL").ok())?;

        Ok(Self {
            store,
            db_max_connections: parsed("DB_MAX_CONNECTIONS", "10")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parsed("PORT", "8080")?,
            app_base_url: env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost".into()),
        })
    }

    /// Configuration for running fully in memory (tests, local demos).
    pub fn in_memory() -> Self {
        Self {
            store: StoreConfig::Memory,
            db_max_connections: 1,
            host: "127.0.0.1".into(),
            port: 8080,
            app_base_url: "http://localhost".into(),
        }
    }
}

fn parsed<T>(key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env::var(key).unwrap_or_else(|_| default.into());
    raw.parse()
        .map_err(|e| anyhow::anyhow!("Invalid value for {key} ({raw}): {e}"))
}
