//! Retry wrapper for operations interrupted by connection-pooler
//! prepared-statement conflicts.
//!
//! Exactly one failure signature is retried: the session handed out by a
//! transaction-mode pooler clashing with a cached query plan. Constraint
//! violations, not-found results, and every other error pass straight through
//! to the caller on the first failure.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr, RuntimeErr};
use std::future::Future;
use tracing::{debug, warn};

use crate::common::RetryPolicy;

/// SQLSTATE codes raised on a pooler prepared-statement conflict:
/// `42P05` (already exists) and `26000` (does not exist).
const POOLER_CONFLICT_CODES: [&str; 2] = ["42P05", "26000"];

/// Seam between the retry loop and the connection manager.
///
/// [`super::ConnectionManager`] is the production implementation; tests
/// substitute fakes to observe acquire/reconnect traffic.
#[async_trait]
pub trait ConnectionSource: Send + Sync {
    /// Connect if needed and hand out a live connection handle
    async fn acquire(&self) -> Result<DatabaseConnection, DbErr>;

    /// Cooldown-gated reconnect. Implementations absorb reconnect failures;
    /// the retry loop proceeds either way.
    async fn reconnect(&self);
}

/// Whether an error carries the pooler prepared-statement conflict signature.
///
/// Prefers the SQLSTATE from the driver error chain; falls back to message
/// inspection for errors that lost their code on the way up (the pooler
/// itself reports some conflicts as plain protocol errors).
pub fn is_prepared_statement_conflict(err: &DbErr) -> bool {
    if let Some(code) = sqlstate(err) {
        if POOLER_CONFLICT_CODES.contains(&code.as_str()) {
            return true;
        }
    }

    let message = err.to_string().to_lowercase();
    message.contains("prepared statement")
        && (message.contains("already exists") || message.contains("does not exist"))
}

fn sqlstate(err: &DbErr) -> Option<String> {
    let sqlx_err = match err {
        DbErr::Conn(RuntimeErr::SqlxError(e))
        | DbErr::Exec(RuntimeErr::SqlxError(e))
        | DbErr::Query(RuntimeErr::SqlxError(e)) => e,
        _ => return None,
    };
    sqlx_err
        .as_database_error()
        .and_then(|db| db.code().map(|code| code.into_owned()))
}

/// Execute a database operation, retrying on pooler conflicts.
///
/// Each attempt acquires a (possibly fresh) connection handle from `source`
/// and passes it to `operation`. On a conflict with budget remaining the
/// source is asked to reconnect — which it may skip inside its cooldown
/// window — and the loop waits `policy.base_delay * (attempt + 1)` before
/// trying again. Any other error, and a conflict once the budget is spent,
/// is returned unchanged.
///
/// # Example
///
/// ```ignore
/// use database::common::RetryPolicy;
/// use database::postgres::execute_with_retry;
///
/// let count = execute_with_retry(&manager, &RetryPolicy::default(), |db| async move {
///     order::Entity::find().count(&db).await
/// })
/// .await?;
/// ```
pub async fn execute_with_retry<S, F, Fut, T>(
    source: &S,
    policy: &RetryPolicy,
    operation: F,
) -> Result<T, DbErr>
where
    S: ConnectionSource + ?Sized,
    F: Fn(DatabaseConnection) -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut attempt = 0;

    loop {
        let db = source.acquire().await?;

        match operation(db).await {
            Ok(value) => {
                if attempt > 0 {
                    debug!(attempts = attempt + 1, "Operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) => {
                if !is_prepared_statement_conflict(&err) || attempt >= policy.max_retries {
                    return Err(err);
                }

                let delay = policy.delay_for_attempt(attempt);
                warn!(
                    attempt = attempt + 1,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Prepared statement conflict, reconnecting and retrying"
                );

                source.reconnect().await;
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
