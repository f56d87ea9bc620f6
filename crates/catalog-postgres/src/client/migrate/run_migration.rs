use std::ops::DerefMut;
use std::time::Instant;

use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

use super::{MigrationResult, custom_hooks, get_migration_status};
use crate::{MIGRATIONS, PgClient, PgError, PgResult, TRACING_TARGET_MIGRATION};

/// Applies all pending embedded migrations.
///
/// The diesel migration harness is synchronous, so it runs on the blocking
/// pool with the pooled connection wrapped for blocking use.
#[tracing::instrument(skip(pg), target = TRACING_TARGET_MIGRATION)]
pub async fn run_pending_migrations(pg: &PgClient) -> PgResult<MigrationResult> {
    let start_time = Instant::now();
    let mut conn = pg.get_pooled_connection().await?;
    let initial_status = get_migration_status(&mut conn).await?;

    if initial_status.is_up_to_date() {
        tracing::info!(
            target: TRACING_TARGET_MIGRATION,
            applied_count = initial_status.applied_migrations(),
            "Database schema is already up to date"
        );
        return Ok(MigrationResult::success(start_time.elapsed(), vec![]));
    }

    tracing::info!(
        target: TRACING_TARGET_MIGRATION,
        pending_migrations = initial_status.pending_migrations(),
        next_pending = initial_status.next_pending_version(),
        "Applying pending migrations"
    );

    custom_hooks::pre_migrate(&mut conn).await?;

    let mut conn: AsyncConnectionWrapper<_> = conn.into();
    let joined = spawn_blocking(move || {
        let versions = conn.run_pending_migrations(MIGRATIONS).map(|versions| {
            versions
                .into_iter()
                .map(|version| version.to_string())
                .collect::<Vec<_>>()
        });
        (versions, conn)
    })
    .await;

    let duration = start_time.elapsed();
    let (versions, mut conn) = joined.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_MIGRATION,
            duration = ?duration,
            error = %err,
            "Migration task panicked"
        );
        PgError::Migration(err.into())
    })?;

    let migrated = versions.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_MIGRATION,
            duration = ?duration,
            error = %err,
            "Database migration failed"
        );
        PgError::Migration(err)
    });

    let post_hook = custom_hooks::post_migrate(conn.deref_mut()).await;
    let versions = settle_migration(migrated, post_hook)?;

    tracing::info!(
        target: TRACING_TARGET_MIGRATION,
        duration = ?duration,
        migrations_count = versions.len(),
        "Database migrations applied"
    );

    Ok(MigrationResult::success(duration, versions))
}

/// Combines the harness outcome with the post-migration hook outcome.
///
/// A migration failure is always the returned error; a hook failure on top
/// of it is logged.
fn settle_migration(
    migrated: PgResult<Vec<String>>,
    post_hook: PgResult<()>,
) -> PgResult<Vec<String>> {
    match (migrated, post_hook) {
        (Ok(versions), Ok(())) => Ok(versions),
        (Ok(_), Err(hook)) => Err(hook),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(hook)) => {
            tracing::error!(
                target: TRACING_TARGET_MIGRATION,
                error = %err,
                hook_error = %hook,
                "Post-migration hook failed after a failed migration"
            );
            Err(err)
        }
    }
}
