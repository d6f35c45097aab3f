use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Where items are kept, chosen by `STORAGE_BACKEND`.
#[derive(Clone, Debug)]
pub enum StorageBackend {
    /// Process-local; lost on restart
    Memory,
    Postgres(PostgresConfig),
}

impl FromEnv for StorageBackend {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env_or_default("STORAGE_BACKEND", "memory");
        match raw.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            // DATABASE_URL is only required on this branch
            "postgres" => Ok(StorageBackend::Postgres(PostgresConfig::from_env()?)),
            _ => Err(ConfigError::ParseError {
                key: "STORAGE_BACKEND".to_string(),
                details: format!("expected 'memory' or 'postgres', got '{}'", raw),
            }),
        }
    }
}

/// Application configuration composed from the shared config pieces
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub storage: StorageBackend,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080 by default
        let storage = StorageBackend::from_env()?;

        Ok(Self {
            app: app_info!(),
            server,
            storage,
            environment,
        })
    }
}
