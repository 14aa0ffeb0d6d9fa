use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::AppError, service::reconcile::ReconcileService};

/// Starts the access reconciliation scheduler.
///
/// Runs `ReconcileService::sweep` on the given cron schedule. The returned scheduler
/// must be kept alive for the job to keep running.
///
/// # Arguments
/// - `db`: Database connection
/// - `cron`: Six-field cron expression, e.g. `0 */15 * * * *`
pub async fn start_scheduler(db: DatabaseConnection, cron: &str) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(cron, move |_uuid, _lock| {
        let db = db.clone();

        Box::pin(async move {
            if let Err(e) = ReconcileService::new(&db).sweep().await {
                tracing::error!("Error reconciling server access: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Access reconciliation scheduler started ({})", cron);

    Ok(scheduler)
}
