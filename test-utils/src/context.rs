//! Per-test SQLite database and cookie session.

use std::sync::Arc;

use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use time::Duration;
use tower_sessions::{Expiry, Session};
use tower_sessions_sqlx_store::SqliteStore;

use crate::error::TestError;

const SESSION_IDLE_TIMEOUT: Duration = Duration::minutes(10);

/// A private `sqlite::memory:` database and, on request, a tower-sessions `Session`
/// stored in it.
///
/// `TestBuilder::build` opens `db` and creates the requested tables. `session` stays
/// `None` until a test of cookie-session state calls `session()`.
pub struct TestContext {
    pub db: Option<DatabaseConnection>,
    pub session: Option<Session>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            db: None,
            session: None,
        }
    }

    /// Opens the in-memory database if this context has none yet.
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        if self.db.is_none() {
            self.db = Some(Database::connect("sqlite::memory:").await?);
        }

        self.db.as_ref().ok_or(TestError::NotInitialized("database"))
    }

    /// Runs `stmts` against the database in the given order, so referenced tables must
    /// come first.
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Returns this context's cookie session, creating it on first use.
    ///
    /// The first call adds the `tower_sessions` table to the test database. The
    /// session expires after ten idle minutes, the same policy the server uses.
    pub async fn session(&mut self) -> Result<&Session, TestError> {
        if self.session.is_none() {
            let pool = self.database().await?.get_sqlite_connection_pool().clone();
            let store = SqliteStore::new(pool);
            store
                .migrate()
                .await
                .map_err(|e| TestError::SessionStore(e.to_string()))?;

            self.session = Some(Session::new(
                None,
                Arc::new(store),
                Some(Expiry::OnInactivity(SESSION_IDLE_TIMEOUT)),
            ));
        }

        self.session
            .as_ref()
            .ok_or(TestError::NotInitialized("session"))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
