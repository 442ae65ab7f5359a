use crate::migrate::{MigrationResult, run_pending_migrations};
use crate::{PgClient, PgResult};

/// Extension trait adding migration support to [`PgClient`].
pub trait PgClientMigrationExt {
    /// Applies every migration that has not been applied yet.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration fails or the database is unreachable.
    fn run_pending_migrations(&self) -> impl Future<Output = PgResult<MigrationResult>> + Send;
}

impl PgClientMigrationExt for PgClient {
    async fn run_pending_migrations(&self) -> PgResult<MigrationResult> {
        run_pending_migrations(self).await
    }
}
