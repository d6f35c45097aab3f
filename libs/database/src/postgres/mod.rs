//! PostgreSQL connection lifecycle: connect (with retry), probe, close.

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::{close, connect_from_config_with_retry};
pub use health::check_health;

pub use sea_orm::DatabaseConnection;
