use sea_orm::{DatabaseTransaction, DbErr, TransactionTrait};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::timeout;
use tracing::warn;

use super::retry::{execute_with_retry, ConnectionSource};
use crate::common::RetryPolicy;

/// Upper bound on the body of a managed transaction
pub const TRANSACTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on acquiring the transaction itself
pub const TRANSACTION_MAX_WAIT: Duration = Duration::from_secs(5);

/// Run `callback` inside a transaction, retried through the pooler-conflict
/// retry loop.
///
/// The transaction is acquired with a fixed max-wait and its body runs under a
/// fixed timeout. The callback's result decides commit vs rollback; its error
/// (and any timeout, expressed as a `DbErr`) propagates through the same
/// classification as any other operation, so only pooler conflicts trigger a
/// reconnect-and-retry.
///
/// The callback may run more than once; it must be safe to re-execute against
/// a fresh transaction.
///
/// # Example
///
/// ```ignore
/// use database::common::RetryPolicy;
/// use database::postgres::transaction;
///
/// let order = transaction(&manager, &RetryPolicy::default(), |txn| {
///     Box::pin(async move {
///         let order = order::ActiveModel { /* ... */ }.insert(txn).await?;
///         order_item::Entity::insert_many(items).exec(txn).await?;
///         Ok(order)
///     })
/// })
/// .await?;
/// ```
pub async fn transaction<S, F, T>(
    source: &S,
    policy: &RetryPolicy,
    callback: F,
) -> Result<T, DbErr>
where
    S: ConnectionSource + ?Sized,
    F: for<'c> Fn(
        &'c DatabaseTransaction,
    ) -> Pin<Box<dyn Future<Output = Result<T, DbErr>> + Send + 'c>>,
{
    let callback = &callback;

    execute_with_retry(source, policy, move |db| async move {
        let txn = timeout(TRANSACTION_MAX_WAIT, db.begin()).await.map_err(|_| {
            DbErr::Custom(format!(
                "transaction acquire timed out after {}s",
                TRANSACTION_MAX_WAIT.as_secs()
            ))
        })??;

        match timeout(TRANSACTION_TIMEOUT, callback(&txn)).await {
            Ok(Ok(value)) => {
                txn.commit().await?;
                Ok(value)
            }
            Ok(Err(err)) => {
                rollback_logged(txn).await;
                Err(err)
            }
            Err(_) => {
                rollback_logged(txn).await;
                Err(DbErr::Custom(format!(
                    "transaction timed out after {}s",
                    TRANSACTION_TIMEOUT.as_secs()
                )))
            }
        }
    })
    .await
}

async fn rollback_logged(txn: DatabaseTransaction) {
    if let Err(err) = txn.rollback().await {
        warn!(error = %err, "Transaction rollback failed");
    }
}
