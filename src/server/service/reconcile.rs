use sea_orm::DatabaseConnection;

use crate::server::{data::server_access::ServerAccessRepository, error::AppError};

/// Removes access rows left behind by servers that no longer exist.
///
/// Server deletion is transactional, so the sweep normally finds nothing; it repairs
/// rows written by older deployments or manual database edits.
pub struct ReconcileService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReconcileService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Runs one reconciliation sweep.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of orphaned access rows deleted
    /// - `Err(AppError::DbErr)` - Database error during the sweep
    pub async fn sweep(&self) -> Result<u64, AppError> {
        let removed = ServerAccessRepository::new(self.db).delete_orphans().await?;

        if removed > 0 {
            tracing::warn!("Removed {} orphaned server access rows", removed);
        } else {
            tracing::debug!("No orphaned server access rows found");
        }

        Ok(removed)
    }
}
