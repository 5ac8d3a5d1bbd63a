//! PostgreSQL connection management with pooler-conflict recovery
//!
//! Provides the connection manager, the retry wrapper for prepared-statement
//! conflicts, the transaction helper, and health checks.

mod config;
mod health;
mod manager;
mod retry;
mod transaction;

pub use config::PostgresConfig;
pub use health::{check_health, check_health_detailed, HealthStatus};
pub use manager::{ConnectionManager, DEFAULT_RECONNECT_COOLDOWN, DEFAULT_RECONNECT_SETTLE};
pub use retry::{execute_with_retry, is_prepared_statement_conflict, ConnectionSource};
pub use transaction::{transaction, TRANSACTION_MAX_WAIT, TRANSACTION_TIMEOUT};

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseConnection, DatabaseTransaction, DbErr};
