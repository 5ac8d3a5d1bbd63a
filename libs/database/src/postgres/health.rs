use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use serde::Serialize;
use tracing::debug;

use crate::common::DatabaseError;

/// Check PostgreSQL database health
///
/// Executes a simple `SELECT 1` query to verify the connection is working.
/// Useful for readiness and liveness probes.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    debug!("Running PostgreSQL health check");

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    db.query_one_raw(stmt).await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("PostgreSQL health check failed: {}", e))
    })?;

    debug!("PostgreSQL health check passed");
    Ok(())
}

/// Health check result for detailed status reporting
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Whether the database is healthy
    pub healthy: bool,

    /// Optional error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Observed round-trip latency in milliseconds
    pub latency_ms: u64,
}

impl HealthStatus {
    /// Create a healthy status
    pub fn healthy(latency_ms: u64) -> Self {
        Self {
            healthy: true,
            message: None,
            latency_ms,
        }
    }

    /// Create an unhealthy status
    pub fn unhealthy(message: String, latency_ms: u64) -> Self {
        Self {
            healthy: false,
            message: Some(message),
            latency_ms,
        }
    }
}

/// Check PostgreSQL database health with detailed status
///
/// Returns health plus observed latency. Never fails; an unhealthy status
/// carries the underlying error message.
pub async fn check_health_detailed(db: &DatabaseConnection) -> HealthStatus {
    let start = std::time::Instant::now();

    match check_health(db).await {
        Ok(_) => HealthStatus::healthy(start.elapsed().as_millis() as u64),
        Err(e) => HealthStatus::unhealthy(e.to_string(), start.elapsed().as_millis() as u64),
    }
}
