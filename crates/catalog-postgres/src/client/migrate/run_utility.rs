use diesel::migration::{Migration, MigrationSource};
use diesel::pg::Pg;
use diesel::sql_query;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::{debug, info, instrument, warn};

use super::MigrationStatus;
use crate::{MIGRATIONS, PgError, PgResult, TRACING_TARGET_MIGRATION};

/// Name of the table diesel records applied migrations in.
const MIGRATION_TABLE: &str = "__diesel_schema_migrations";

/// Returns the versions of every migration compiled into this crate, oldest first.
pub(crate) fn embedded_versions() -> PgResult<Vec<String>> {
    let migrations = MigrationSource::<Pg>::migrations(&MIGRATIONS).map_err(PgError::Migration)?;

    let mut versions: Vec<String> = migrations
        .iter()
        .map(|migration| migration.name().version().to_string())
        .collect();
    versions.sort();

    Ok(versions)
}

/// Gets the current migration status of the database.
#[instrument(skip(conn), target = TRACING_TARGET_MIGRATION)]
pub async fn get_migration_status(conn: &mut AsyncPgConnection) -> PgResult<MigrationStatus> {
    let applied_versions = get_applied_migrations(conn).await?;
    let status = MigrationStatus::from_versions(embedded_versions()?, applied_versions);

    debug!(
        target: TRACING_TARGET_MIGRATION,
        applied_count = status.applied_migrations(),
        pending_count = status.pending_migrations(),
        is_up_to_date = status.is_up_to_date(),
        "Migration status retrieved"
    );

    Ok(status)
}

/// Verifies that the migration table exists and every embedded migration is applied.
#[instrument(skip(conn), target = TRACING_TARGET_MIGRATION)]
pub async fn verify_schema_integrity(conn: &mut AsyncPgConnection) -> PgResult<()> {
    info!(target: TRACING_TARGET_MIGRATION, "Verifying database schema integrity");

    if !migration_table_exists(conn).await? {
        warn!(target: TRACING_TARGET_MIGRATION, "Migration table does not exist, database may not be initialized");
        return Err(PgError::Migration(
            format!("Migration table {MIGRATION_TABLE} does not exist").into(),
        ));
    }

    let status = get_migration_status(conn).await?;
    if let Some(version) = status.next_pending_version() {
        warn!(
            target: TRACING_TARGET_MIGRATION,
            pending_count = status.pending_migrations(),
            next_pending = version,
            "Database schema is behind the embedded migrations"
        );
        return Err(PgError::Migration(
            format!(
                "{} migrations pending, starting at {version}",
                status.pending_migrations()
            )
            .into(),
        ));
    }

    info!(target: TRACING_TARGET_MIGRATION, "Database schema integrity verification passed");
    Ok(())
}

/// Gets the applied migration versions, oldest first.
///
/// A database that has never been migrated has none.
#[instrument(skip(conn), target = TRACING_TARGET_MIGRATION)]
pub async fn get_applied_migrations(conn: &mut AsyncPgConnection) -> PgResult<Vec<String>> {
    #[derive(diesel::QueryableByName)]
    struct MigrationVersion {
        #[diesel(sql_type = diesel::sql_types::Text)]
        version: String,
    }

    if !migration_table_exists(conn).await? {
        return Ok(Vec::new());
    }

    let versions = sql_query(format!(
        "SELECT version FROM {MIGRATION_TABLE} ORDER BY version"
    ))
    .get_results::<MigrationVersion>(conn)
    .await
    .map_err(|e| PgError::Migration(format!("Failed to get applied migrations: {e}").into()))?
    .into_iter()
    .map(|row| row.version)
    .collect();

    Ok(versions)
}

async fn migration_table_exists(conn: &mut AsyncPgConnection) -> PgResult<bool> {
    #[derive(diesel::QueryableByName)]
    struct ExistsResult {
        #[diesel(sql_type = diesel::sql_types::Bool)]
        found: bool,
    }

    let exists = sql_query(
        "SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_name = $1
         ) AS found",
    )
    .bind::<diesel::sql_types::Text, _>(MIGRATION_TABLE)
    .get_result::<ExistsResult>(conn)
    .await
    .map_err(|e| PgError::Migration(format!("Failed to check migration table: {e}").into()))?;

    Ok(exists.found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_migrations_are_listed() {
        let versions = embedded_versions().unwrap();
        assert_eq!(versions.len(), 1);
        assert!(versions[0].replace('-', "").starts_with("20240601"));
    }
}
