//! Hooks run around a migration.

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::PoolableConnection;

use crate::{PgError, PgResult, TRACING_TARGET_MIGRATION};

/// Called before the connection is handed to the migration harness.
///
/// Refuses to migrate over a broken connection.
pub async fn pre_migrate(conn: &mut AsyncPgConnection) -> PgResult<()> {
    if conn.is_broken() {
        tracing::error!(
            target: TRACING_TARGET_MIGRATION,
            hook = "pre_migrate",
            "Connection is broken before migrations"
        );
        return Err(PgError::Migration(
            "connection is broken before migrations".into(),
        ));
    }

    tracing::info!(
        target: TRACING_TARGET_MIGRATION,
        hook = "pre_migrate",
        "Preparing to run database migrations"
    );

    Ok(())
}

/// Called after the migration harness has returned the connection.
pub async fn post_migrate(conn: &mut AsyncPgConnection) -> PgResult<()> {
    let is_broken = conn.is_broken();

    tracing::info!(
        target: TRACING_TARGET_MIGRATION,
        hook = "post_migrate",
        is_broken,
        "Database migrations finished"
    );

    if is_broken {
        tracing::error!(
            target: TRACING_TARGET_MIGRATION,
            hook = "post_migrate",
            "Connection is broken after migrations, possible migration failure"
        );
    }

    Ok(())
}
