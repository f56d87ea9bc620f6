//! Scoped transactions that keep the original failure.

use diesel_async::scoped_futures::ScopedBoxFuture;
use diesel_async::{AnsiTransactionManager, TransactionManager};

use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY};

type Manager = AnsiTransactionManager;

/// Runs `f` inside a transaction on `conn`.
///
/// Commits when `f` succeeds and rolls back when it fails. If the rollback
/// fails too, the returned [`PgError::Rollback`] carries the failure of `f`
/// with the rollback failure appended; the original error is never replaced.
///
/// ```ignore
/// scoped_transaction(conn, |conn| {
///     async move {
///         diesel::delete(links).execute(conn).await?;
///         diesel::delete(rows).execute(conn).await?;
///         Ok(())
///     }
///     .scope_boxed()
/// })
/// .await?;
/// ```
pub async fn scoped_transaction<'a, T, F>(conn: &mut PgConnection, f: F) -> PgResult<T>
where
    F: for<'r> FnOnce(&'r mut PgConnection) -> ScopedBoxFuture<'a, 'r, PgResult<T>>
        + Send
        + 'a,
    T: Send + 'a,
{
    <Manager as TransactionManager<PgConnection>>::begin_transaction(conn)
        .await
        .map_err(PgError::from)?;

    let error = match f(&mut *conn).await {
        Ok(value) => {
            // A failed COMMIT is rolled back by the transaction manager itself.
            <Manager as TransactionManager<PgConnection>>::commit_transaction(conn)
                .await
                .map_err(PgError::from)?;
            return Ok(value);
        }
        Err(error) => error,
    };

    match <Manager as TransactionManager<PgConnection>>::rollback_transaction(conn).await {
        Ok(()) => {
            tracing::debug!(target: TRACING_TARGET_QUERY, error = %error, "Transaction rolled back");
            Err(error)
        }
        Err(rollback) => {
            tracing::error!(
                target: TRACING_TARGET_QUERY,
                error = %error,
                rollback_error = %rollback,
                "Transaction rollback failed"
            );
            Err(PgError::Rollback {
                error: Box::new(error),
                rollback,
            })
        }
    }
}
