//! PostgreSQL client with connection pooling and migration management.
//!
//! This module provides the pooled client, its configuration, the pool and
//! connection hooks, scoped transactions, and the embedded migration runner.

pub(crate) mod custom_hooks;
pub mod migrate;
mod pg_client;
mod pg_config;
mod transaction;

use deadpool::managed::{Object, Pool};
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
pub use migrate::{
    MigrationResult, MigrationStatus, PgClientMigrationExt, get_applied_migrations,
    get_migration_status, run_pending_migrations, verify_schema_integrity,
};
pub use pg_client::{PgClient, PgConn, PgPoolStatus};
pub use pg_config::PgConfig;
pub use transaction::scoped_transaction;

/// Type alias for the connection pool used throughout the crate.
pub type ConnectionPool = Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;

/// Type alias for a connection object from the pool.
pub type PooledConnection = Object<AsyncDieselConnectionManager<AsyncPgConnection>>;
