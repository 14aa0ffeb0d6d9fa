mod model;
mod server;

use tracing_subscriber::EnvFilter;

use crate::server::{
    config::{AuthMode, Config},
    error::AppError,
    router, scheduler, startup,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    if config.auth_mode == AuthMode::TrustAccountId {
        tracing::warn!(
            "AUTH_MODE=trust-account-id: requests without a session token act as any accountId they name. Never use this in production."
        );
    }

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;

    let _reconcile_scheduler =
        scheduler::reconcile::start_scheduler(db.clone(), &config.reconcile_cron).await?;

    let state = startup::build_state(&config, db)?;
    let app = router::app(state, session, config.cors_allowed_origin.as_deref())?;

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .map_err(|e| {
            AppError::InternalError(format!("Failed to bind {}: {}", config.bind_address, e))
        })?;

    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::InternalError(format!("Server error: {}", e)))
}
