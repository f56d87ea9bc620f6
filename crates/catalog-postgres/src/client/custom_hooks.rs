//! Includes all callbacks and hooks for [`diesel`] and [`deadpool`].

use std::time::Instant;

use deadpool::managed::{HookResult, Metrics};
use diesel::ConnectionResult;
use diesel_async::pooled_connection::{PoolError, PoolableConnection};
use diesel_async::{AsyncConnection, AsyncPgConnection};
use futures::FutureExt;
use futures::future::BoxFuture;

use crate::TRACING_TARGET_CONNECTION;

/// Masks the password in a database URL for safe logging.
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@')
        && let Some(colon_pos) = url[..at_pos].rfind(':')
        && !url[colon_pos + 1..].starts_with("//")
    {
        let mut masked = url.to_string();
        masked.replace_range(colon_pos + 1..at_pos, "***");
        return masked;
    }

    url.to_string()
}

/// Custom setup procedure used to establish a new connection.
///
/// See [`ManagerConfig`] for more details.
///
/// [`ManagerConfig`]: diesel_async::pooled_connection::ManagerConfig
pub fn setup_callback<C>(addr: &str) -> BoxFuture<'_, ConnectionResult<C>>
where
    C: AsyncConnection + 'static,
{
    let start = Instant::now();
    let masked_addr = mask_url(addr);

    tracing::debug!(
        target: TRACING_TARGET_CONNECTION,
        hook = "setup_callback",
        addr = %masked_addr,
        "Establishing new database connection"
    );

    async move {
        let result = C::establish(addr).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(_) => tracing::info!(
                target: TRACING_TARGET_CONNECTION,
                hook = "setup_callback",
                addr = %masked_addr,
                elapsed_ms = elapsed.as_millis(),
                "Database connection established"
            ),
            Err(err) => tracing::error!(
                target: TRACING_TARGET_CONNECTION,
                hook = "setup_callback",
                addr = %masked_addr,
                elapsed_ms = elapsed.as_millis(),
                error = %err,
                "Failed to establish database connection"
            ),
        }

        result
    }
    .boxed()
}

/// Custom hook called after a new connection has been established.
///
/// See [`PoolBuilder`] for more details.
///
/// [`PoolBuilder`]: deadpool::managed::PoolBuilder
pub fn post_create(conn: &mut AsyncPgConnection, metrics: &Metrics) -> HookResult<PoolError> {
    let is_broken = conn.is_broken();

    tracing::info!(
        target: TRACING_TARGET_CONNECTION,
        hook = "post_create",
        is_broken,
        created_at = ?metrics.created,
        "Connection added to pool"
    );

    if is_broken {
        tracing::warn!(
            target: TRACING_TARGET_CONNECTION,
            hook = "post_create",
            "Connection is broken after creation"
        );
    }

    Ok(())
}

/// Custom hook called before a connection is recycled.
pub fn pre_recycle(conn: &mut AsyncPgConnection, metrics: &Metrics) -> HookResult<PoolError> {
    let is_broken = conn.is_broken();

    tracing::trace!(
        target: TRACING_TARGET_CONNECTION,
        hook = "pre_recycle",
        is_broken,
        last_recycled = ?metrics.recycled,
        recycle_count = metrics.recycle_count,
        "Preparing to recycle connection"
    );

    if is_broken {
        tracing::warn!(
            target: TRACING_TARGET_CONNECTION,
            hook = "pre_recycle",
            recycle_count = metrics.recycle_count,
            "Connection is broken before recycling"
        );
    }

    Ok(())
}

/// Custom hook called after a connection has been recycled.
pub fn post_recycle(conn: &mut AsyncPgConnection, metrics: &Metrics) -> HookResult<PoolError> {
    if conn.is_broken() {
        tracing::error!(
            target: TRACING_TARGET_CONNECTION,
            hook = "post_recycle",
            recycle_count = metrics.recycle_count,
            "Connection is broken after recycling, should be removed from pool"
        );
    }

    Ok(())
}
