//! Migration methods on [`PgClient`].

use std::future::Future;

use super::{MigrationResult, MigrationStatus};
use crate::{PgClient, PgResult};

/// Extension trait adding migration management to [`PgClient`].
pub trait PgClientMigrationExt {
    /// Applies all pending migrations.
    ///
    /// Safe to call on every start; an up-to-date database is a no-op.
    fn run_pending_migrations(&self) -> impl Future<Output = PgResult<MigrationResult>>;

    /// Returns which embedded migrations are applied and which are pending.
    fn get_migration_status(&self) -> impl Future<Output = PgResult<MigrationStatus>>;

    /// Fails unless the database is initialized and fully migrated.
    fn verify_schema_integrity(&self) -> impl Future<Output = PgResult<()>>;
}

impl PgClientMigrationExt for PgClient {
    async fn run_pending_migrations(&self) -> PgResult<MigrationResult> {
        super::run_pending_migrations(self).await
    }

    async fn get_migration_status(&self) -> PgResult<MigrationStatus> {
        let mut conn = self.get_connection().await?;
        super::get_migration_status(&mut conn).await
    }

    async fn verify_schema_integrity(&self) -> PgResult<()> {
        let mut conn = self.get_connection().await?;
        super::verify_schema_integrity(&mut conn).await
    }
}
