//! Migration status and outcome reports.

use std::time::Duration;

/// Applied and pending migrations of a database.
///
/// # Example
///
/// ```rust
/// use catalog_postgres::MigrationStatus;
///
/// let status = MigrationStatus::from_versions(
///     vec!["001".to_string(), "002".to_string()],
///     vec!["001".to_string()],
/// );
/// assert_eq!(status.next_pending_version(), Some("002"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Applied migration versions in chronological order
    pub applied_versions: Vec<String>,
    /// Pending migration versions in the order they will be applied
    pub pending_versions: Vec<String>,
}

impl MigrationStatus {
    /// Creates a new migration status.
    pub fn new(
        applied_versions: impl Into<Vec<String>>,
        pending_versions: impl Into<Vec<String>>,
    ) -> Self {
        Self {
            applied_versions: applied_versions.into(),
            pending_versions: pending_versions.into(),
        }
    }

    /// Compares the known migrations with those recorded as applied.
    ///
    /// Every known version that is not applied is pending. Applied versions
    /// unknown to this build are kept in `applied_versions`.
    pub fn from_versions(known: Vec<String>, applied: Vec<String>) -> Self {
        let pending = known
            .into_iter()
            .filter(|version| !applied.contains(version))
            .collect::<Vec<_>>();

        Self::new(applied, pending)
    }

    /// Returns the progress ratio (0.0 to 1.0) of applied migrations.
    pub fn progress_ratio(&self) -> f64 {
        let total_migrations = self.total_migrations();
        if total_migrations == 0 {
            1.0
        } else {
            self.applied_migrations() as f64 / total_migrations as f64
        }
    }

    /// Returns the last applied migration version, if any.
    pub fn last_applied_version(&self) -> Option<&str> {
        self.applied_versions.last().map(String::as_str)
    }

    /// Returns the next pending migration version, if any.
    pub fn next_pending_version(&self) -> Option<&str> {
        self.pending_versions.first().map(String::as_str)
    }

    /// Returns the number of applied migrations.
    #[inline]
    pub fn applied_migrations(&self) -> usize {
        self.applied_versions.len()
    }

    /// Returns the number of pending migrations.
    #[inline]
    pub fn pending_migrations(&self) -> usize {
        self.pending_versions.len()
    }

    /// Returns the total number of migrations.
    #[inline]
    pub fn total_migrations(&self) -> usize {
        self.applied_migrations() + self.pending_migrations()
    }

    /// Returns true if all migrations have been applied.
    #[inline]
    pub fn is_up_to_date(&self) -> bool {
        self.pending_versions.is_empty()
    }
}

/// Outcome of a migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationResult {
    /// Total duration of the run
    pub duration: Duration,
    /// Migration versions applied by the run
    pub processed_versions: Vec<String>,
    /// Error message if the run failed
    pub error_message: Option<String>,
}

impl MigrationResult {
    /// Creates a successful migration result.
    pub fn success(duration: Duration, processed_versions: Vec<String>) -> Self {
        Self {
            duration,
            processed_versions,
            error_message: None,
        }
    }

    /// Creates a failed migration result.
    pub fn failure(duration: Duration, error_message: impl Into<String>) -> Self {
        Self {
            duration,
            processed_versions: vec![],
            error_message: Some(error_message.into()),
        }
    }

    /// Returns whether the run succeeded.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.error_message.is_none()
    }

    /// Returns the average time per migration applied.
    pub fn average_time_per_migration(&self) -> Option<Duration> {
        let processed = u32::try_from(self.processed_versions.len()).ok()?;
        (processed > 0).then(|| self.duration / processed)
    }

    /// Returns whether the run succeeded without applying anything.
    pub fn is_no_op(&self) -> bool {
        self.is_success() && self.processed_versions.is_empty()
    }

    /// Returns the last applied migration version, if any.
    pub fn last_processed_version(&self) -> Option<&str> {
        self.processed_versions.last().map(String::as_str)
    }
}
