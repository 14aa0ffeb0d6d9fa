use thiserror::Error;

/// Errors that can occur while preparing a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    /// Failed to connect to the in-memory database or to create a table.
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// Failed to create the cookie session table.
    #[error("session store setup failed: {0}")]
    SessionStore(String),

    #[error("{0} was not initialized")]
    NotInitialized(&'static str),
}
