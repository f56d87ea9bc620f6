use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use deadpool::managed::{Hook, Pool};
use derive_more::{Deref, DerefMut};
use diesel_async::RunQueryDsl;
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, ManagerConfig};
use diesel_async::scoped_futures::ScopedBoxFuture;

use super::{custom_hooks, scoped_transaction};
use crate::{
    ConnectionPool, PgConfig, PgConnection, PgError, PgResult, PooledConnection,
    TRACING_TARGET_CLIENT, TRACING_TARGET_CONNECTION,
};

/// Acquisitions slower than this are logged as warnings.
const SLOW_ACQUIRE: Duration = Duration::from_millis(100);

/// Connection pool status information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PgPoolStatus {
    /// Maximum number of connections in the pool
    pub max_size: usize,
    /// Current number of connections in the pool
    pub size: usize,
    /// Number of available connections
    pub available: usize,
    /// Number of requests waiting for connections
    pub waiting: usize,
}

impl PgPoolStatus {
    /// Returns the utilization of the pool (0.0 to 1.0).
    #[inline]
    pub fn utilization(&self) -> f64 {
        if self.max_size == 0 {
            0.0
        } else {
            self.size.saturating_sub(self.available) as f64 / self.max_size as f64
        }
    }

    /// Returns whether the pool is under pressure (high utilization or waiting requests).
    #[inline]
    pub fn is_under_pressure(&self) -> bool {
        self.waiting > 0 || self.utilization() > 0.8
    }
}

/// Pooled PostgreSQL client for the catalog.
///
/// Cheap to clone; clones share one pool. Connections obtained from it
/// implement [`RowSource`], so the pagination facade runs directly on them,
/// and dereference to the connection the repository traits are implemented for.
///
/// [`RowSource`]: catalog_core::RowSource
#[derive(Clone)]
pub struct PgClient {
    inner: Arc<PgClientInner>,
}

struct PgClientInner {
    pool: ConnectionPool,
    config: PgConfig,
}

impl PgClient {
    /// Creates a new client and its connection pool.
    ///
    /// Connections are opened lazily.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be built.
    #[tracing::instrument(
        skip(config),
        target = TRACING_TARGET_CLIENT,
        fields(database_url = %config.database_url_masked())
    )]
    pub fn new(config: PgConfig) -> PgResult<Self> {
        tracing::info!(target: TRACING_TARGET_CLIENT, "Initializing database client");

        let mut manager_config = ManagerConfig::default();
        manager_config.custom_setup = Box::new(custom_hooks::setup_callback);
        let manager =
            AsyncDieselConnectionManager::new_with_config(&config.database_url, manager_config);

        let pool = Pool::builder(manager)
            .max_size(config.max_connections as usize)
            .wait_timeout(config.connection_timeout())
            .create_timeout(config.connection_timeout())
            .recycle_timeout(config.idle_timeout())
            .runtime(deadpool::Runtime::Tokio1)
            .post_create(Hook::sync_fn(custom_hooks::post_create))
            .pre_recycle(Hook::sync_fn(custom_hooks::pre_recycle))
            .post_recycle(Hook::sync_fn(custom_hooks::post_recycle))
            .build()
            .map_err(|e| {
                tracing::error!(target: TRACING_TARGET_CLIENT, error = %e, "Failed to create connection pool");
                PgError::Unexpected(format!("Failed to build connection pool: {e}").into())
            })?;

        Ok(Self {
            inner: Arc::new(PgClientInner { pool, config }),
        })
    }

    /// Creates a new client and verifies that the database answers.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be built, no connection can be
    /// established, or the connectivity query fails.
    #[tracing::instrument(
        skip(config),
        target = TRACING_TARGET_CLIENT,
        fields(database_url = %config.database_url_masked())
    )]
    pub async fn new_with_test(config: PgConfig) -> PgResult<Self> {
        let this = Self::new(config)?;

        #[derive(diesel::QueryableByName)]
        struct ConnectivityTest {
            #[diesel(sql_type = diesel::sql_types::Integer)]
            #[allow(dead_code)]
            result: i32,
        }

        let mut conn = this.get_pooled_connection().await?;
        let _: ConnectivityTest = diesel::sql_query("SELECT 1 AS result")
            .get_result(&mut *conn)
            .await
            .map_err(|e| {
                tracing::error!(target: TRACING_TARGET_CLIENT, error = %e, "Database connectivity test failed");
                PgError::from(e)
            })?;

        tracing::info!(
            target: TRACING_TARGET_CLIENT,
            max_connections = this.inner.config.max_connections,
            connection_timeout_secs = this.inner.config.connection_timeout_secs,
            idle_timeout_secs = this.inner.config.idle_timeout_secs,
            "Database client initialized"
        );

        Ok(this)
    }

    /// Gets a connection from the pool.
    ///
    /// Waits up to the configured connection timeout.
    ///
    /// # Errors
    ///
    /// Returns [`PgError::Timeout`] if no connection becomes available in time.
    #[tracing::instrument(skip(self), target = TRACING_TARGET_CONNECTION)]
    pub async fn get_connection(&self) -> PgResult<PgConn> {
        let start = Instant::now();
        let conn = self.inner.pool.get().await.map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_CONNECTION,
                error = %e,
                elapsed = ?start.elapsed(),
                "Failed to acquire connection from pool"
            );
            PgError::from(e)
        })?;

        let elapsed = start.elapsed();
        if elapsed > SLOW_ACQUIRE {
            tracing::warn!(
                target: TRACING_TARGET_CONNECTION,
                elapsed = ?elapsed,
                pool = ?self.pool_status(),
                "Connection acquisition took longer than expected"
            );
        }

        Ok(PgConn::new(conn))
    }

    /// Gets a raw pooled connection, used by the migration runner.
    pub(crate) async fn get_pooled_connection(&self) -> PgResult<PooledConnection> {
        self.inner.pool.get().await.map_err(PgError::from)
    }

    /// Returns the current pool statistics.
    #[inline]
    pub fn pool_status(&self) -> PgPoolStatus {
        let status = self.inner.pool.status();
        PgPoolStatus {
            max_size: status.max_size,
            size: status.size,
            available: status.available,
            waiting: status.waiting,
        }
    }

    /// Returns the configuration used by this client.
    #[inline]
    pub fn config(&self) -> &PgConfig {
        &self.inner.config
    }
}

impl fmt::Debug for PgClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pool_status = self.pool_status();
        f.debug_struct("PgClient")
            .field("database_url", &self.inner.config.database_url_masked())
            .field("max_connections", &self.inner.config.max_connections)
            .field("pool_size", &pool_status.size)
            .field("pool_available", &pool_status.available)
            .field("pool_waiting", &pool_status.waiting)
            .finish()
    }
}

/// A connection checked out of the pool.
///
/// Implements [`RowSource`], so the pagination facade is available on it,
/// and dereferences to [`PgConnection`] for the repository traits. The connection goes back to the
/// pool when this is dropped.
///
/// [`RowSource`]: catalog_core::RowSource
///
/// ```ignore
/// let mut conn = client.get_connection().await?;
/// let page = conn
///     .paginate_by_cursor(CursorPagination::first(20)?, &filter, sort)
///     .await?;
/// ```
#[derive(Deref, DerefMut)]
pub struct PgConn {
    #[deref]
    #[deref_mut]
    conn: PooledConnection,
}

impl PgConn {
    /// Wraps a pooled connection.
    pub fn new(conn: PooledConnection) -> Self {
        Self { conn }
    }

    /// Runs `f` inside a transaction on this connection.
    ///
    /// See [`scoped_transaction`] for commit and rollback behaviour.
    pub async fn transaction<'a, T, F>(&mut self, f: F) -> PgResult<T>
    where
        F: for<'r> FnOnce(&'r mut PgConnection) -> ScopedBoxFuture<'a, 'r, PgResult<T>>
            + Send
            + 'a,
        T: Send + 'a,
    {
        scoped_transaction(&mut self.conn, f).await
    }
}

impl fmt::Debug for PgConn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgConn").finish_non_exhaustive()
    }
}
