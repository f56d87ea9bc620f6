#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Embeds all migrations into the final binary.
pub(crate) const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
    diesel_migrations::embed_migrations!("./migrations");

// Tracing target constants for consistent logging.

/// Tracing target for client-related operations.
///
/// Use this target for logging client initialization, configuration, and lifecycle events.
pub const TRACING_TARGET_CLIENT: &str = "catalog_postgres::client";

/// Tracing target for database query operations.
///
/// Use this target for logging query execution, results, and query-related errors.
pub const TRACING_TARGET_QUERY: &str = "catalog_postgres::queries";

/// Tracing target for database migration operations.
///
/// Use this target for logging migration application and migration status checks.
pub const TRACING_TARGET_MIGRATION: &str = "catalog_postgres::migrations";

/// Tracing target for database connection operations.
///
/// Use this target for logging connection establishment, pool management, and connection errors.
pub const TRACING_TARGET_CONNECTION: &str = "catalog_postgres::connection";

mod client;
pub mod model;
pub mod prelude;
pub mod query;
mod schema;

use std::borrow::Cow;

use deadpool::managed::TimeoutType;
use diesel::ConnectionError;
use diesel::result::Error;
pub use diesel_async::AsyncPgConnection as PgConnection;

pub use crate::client::{
    ConnectionPool, MigrationResult, MigrationStatus, PgClient, PgClientMigrationExt, PgConfig,
    PgConn, PgPoolStatus, PooledConnection, get_applied_migrations, get_migration_status,
    run_pending_migrations, scoped_transaction, verify_schema_integrity,
};

pub mod error {
    //! Error types and utilities for database operations.
    //!
    //! See [`PgError`] for the main error type used throughout this crate.
    //!
    //! [`PgError`]: crate::PgError

    /// Type-erased error type for dynamic error handling.
    pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

    use std::borrow::Cow;

    pub use deadpool::managed::TimeoutType;
    pub use diesel::result::{ConnectionError as DieselConnectionError, Error as DieselError};
    pub use diesel_async::pooled_connection::PoolError as DieselPoolError;
    pub use diesel_async::pooled_connection::deadpool::PoolError as DeadpoolError;

    /// Provides contextual hints for error types to aid in debugging and user messaging.
    pub trait ErrorHint {
        /// Returns an additional hint for an error type.
        fn hint(&self) -> Cow<'static, str>;
    }

    impl ErrorHint for TimeoutType {
        fn hint(&self) -> Cow<'static, str> {
            match self {
                TimeoutType::Wait => Cow::Borrowed(
                    "Connection pool is exhausted, consider increasing pool size or shortening page queries",
                ),
                TimeoutType::Create => Cow::Borrowed(
                    "Unable to establish new database connection, check connection string and database availability",
                ),
                TimeoutType::Recycle => Cow::Borrowed(
                    "Failed to recycle database connection, connection may be in invalid state",
                ),
            }
        }
    }
}

/// Error type for all PostgreSQL catalog operations.
///
/// Covers connection issues, query failures, pool timeouts, migration
/// problems and failed transaction rollbacks.
#[derive(Debug, thiserror::Error)]
#[must_use = "database errors should be handled appropriately"]
pub enum PgError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database operation timed out.
    ///
    /// This can occur during connection creation, waiting for available connections,
    /// or connection recycling operations.
    #[error("Database operation timed out")]
    Timeout(TimeoutType),

    /// Failed to establish or maintain a database connection.
    #[error("Database connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Database migration operation failed.
    #[error("Database migration error: {0}")]
    Migration(error::BoxError),

    /// Database query execution failed.
    ///
    /// This includes SQL syntax errors, constraint violations, type mismatches,
    /// and other query-related failures.
    #[error("Database query error: {0}")]
    Query(#[from] Error),

    /// A transaction failed and rolling it back failed as well.
    ///
    /// `error` is the failure that aborted the transaction; the rollback
    /// failure is carried alongside it.
    #[error("{error} (rollback also failed: {rollback})")]
    Rollback {
        /// The failure that aborted the transaction.
        #[source]
        error: Box<PgError>,
        /// The failure reported by `ROLLBACK`.
        rollback: Error,
    },

    /// Unexpected error occurred.
    #[error("Unexpected error: {0}")]
    Unexpected(Cow<'static, str>),
}

impl PgError {
    /// Returns the failure that aborted the operation.
    ///
    /// For [`PgError::Rollback`] this is the original transaction failure,
    /// for every other variant the error itself.
    pub fn original(&self) -> &PgError {
        match self {
            PgError::Rollback { error, .. } => error.original(),
            other => other,
        }
    }

    /// Extracts the constraint name from a constraint violation error.
    pub fn constraint(&self) -> Option<&str> {
        let PgError::Query(err) = self.original() else {
            return None;
        };

        let Error::DatabaseError(_, err) = err else {
            return None;
        };

        err.constraint_name()
    }

    /// Returns whether this error indicates a transient failure that might succeed on retry.
    ///
    /// Transient errors include timeouts and certain connection issues that may
    /// be resolved by retrying the operation.
    pub fn is_transient(&self) -> bool {
        matches!(
            self.original(),
            PgError::Timeout(_) | PgError::Connection(ConnectionError::BadConnection(_))
        )
    }

    /// Returns whether this error indicates a permanent failure that won't succeed on retry.
    pub fn is_permanent(&self) -> bool {
        !self.is_transient()
    }
}

impl From<error::DeadpoolError> for PgError {
    fn from(value: error::DeadpoolError) -> Self {
        use error::{DeadpoolError, DieselPoolError};

        match value {
            DeadpoolError::Timeout(timeout) => Self::Timeout(timeout),
            DeadpoolError::Backend(DieselPoolError::QueryError(error)) => Self::Query(error),
            DeadpoolError::Backend(DieselPoolError::ConnectionError(error)) => {
                Self::Connection(error)
            }
            DeadpoolError::PostCreateHook(err) => {
                // Our hooks never fail, but the pool API allows it.
                tracing::warn!("Unexpected post-create hook error: {}", err);
                Self::Unexpected(err.to_string().into())
            }
            DeadpoolError::NoRuntimeSpecified => {
                tracing::error!("No tokio runtime specified for connection pool");
                Self::Unexpected("No runtime specified".into())
            }
            DeadpoolError::Closed => Self::Connection(ConnectionError::InvalidConnectionUrl(
                "Connection pool is closed".into(),
            )),
        }
    }
}

impl From<PgError> for catalog_core::Error {
    fn from(value: PgError) -> Self {
        catalog_core::Error::store(value)
    }
}

/// Specialized [`Result`] type for database operations.
pub type PgResult<T, E = PgError> = Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rollback_keeps_original_failure() {
        let error = PgError::Rollback {
            error: Box::new(PgError::Query(Error::NotFound)),
            rollback: Error::BrokenTransactionManager,
        };

        assert!(matches!(error.original(), PgError::Query(Error::NotFound)));
        let message = error.to_string();
        assert!(message.starts_with("Database query error: Record not found"));
        assert!(message.contains("rollback also failed"));
    }

    #[test]
    fn transient_classification() {
        assert!(PgError::Timeout(TimeoutType::Wait).is_transient());
        assert!(PgError::Config("bad".into()).is_permanent());

        let wrapped = PgError::Rollback {
            error: Box::new(PgError::Timeout(TimeoutType::Create)),
            rollback: Error::BrokenTransactionManager,
        };
        assert!(wrapped.is_transient());
    }

    #[test]
    fn converts_into_store_error() {
        let error: catalog_core::Error = PgError::Query(Error::NotFound).into();
        assert_eq!(error.kind(), catalog_core::ErrorKind::Store);

        let source = error.store_source().expect("store error has a source");
        assert!(matches!(
            source.downcast_ref::<PgError>(),
            Some(PgError::Query(Error::NotFound))
        ));
    }

    #[test]
    fn timeout_hints() {
        use error::ErrorHint;

        assert!(TimeoutType::Wait.hint().contains("pool"));
    }
}
