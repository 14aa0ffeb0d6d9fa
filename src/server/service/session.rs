//! Session manager issuing and validating opaque session tokens.
//!
//! A session maps a random 48-character token to an account ID. Tokens have no expiry;
//! they are valid until destroyed at logout. Only the SHA-256 hash of a token is handed
//! to the store, so neither backend ever holds a usable token.
//!
//! Two stores are available behind the `SessionStore` trait:
//! - `DbSessionStore` persists sessions in the `session` table (default)
//! - `MemorySessionStore` keeps them in process memory for single-process deployments

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tokio::sync::RwLock;

use crate::server::{
    data::session::SessionRepository,
    error::{auth::AuthError, internal::InternalError, AppError},
    util::token::{generate_session_token, hash_token},
};

/// Number of fresh tokens tried before giving up on a colliding insert.
const MAX_TOKEN_ATTEMPTS: u32 = 5;

/// Storage backend for sessions, keyed by token hash.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores `token_hash → account_id` unless the hash is already present.
    ///
    /// Returns `false` on collision; an existing entry is never overwritten.
    async fn insert_if_absent(&self, token_hash: &str, account_id: &str)
        -> Result<bool, AppError>;

    /// Returns the account ID stored for `token_hash`.
    async fn account_id(&self, token_hash: &str) -> Result<Option<String>, AppError>;

    /// Removes `token_hash`; removing an absent hash is not an error.
    async fn remove(&self, token_hash: &str) -> Result<(), AppError>;
}

/// Session store backed by the `session` table.
pub struct DbSessionStore {
    db: DatabaseConnection,
}

impl DbSessionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionStore for DbSessionStore {
    async fn insert_if_absent(
        &self,
        token_hash: &str,
        account_id: &str,
    ) -> Result<bool, AppError> {
        Ok(SessionRepository::new(&self.db)
            .insert(token_hash, account_id)
            .await?)
    }

    async fn account_id(&self, token_hash: &str) -> Result<Option<String>, AppError> {
        Ok(SessionRepository::new(&self.db)
            .find_account_id(token_hash)
            .await?)
    }

    async fn remove(&self, token_hash: &str) -> Result<(), AppError> {
        SessionRepository::new(&self.db).delete(token_hash).await?;
        Ok(())
    }
}

/// Session store holding sessions in process memory.
///
/// Sessions are lost on restart and are not shared between processes.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert_if_absent(
        &self,
        token_hash: &str,
        account_id: &str,
    ) -> Result<bool, AppError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(token_hash) {
            return Ok(false);
        }

        sessions.insert(token_hash.to_string(), account_id.to_string());
        Ok(true)
    }

    async fn account_id(&self, token_hash: &str) -> Result<Option<String>, AppError> {
        Ok(self.sessions.read().await.get(token_hash).cloned())
    }

    async fn remove(&self, token_hash: &str) -> Result<(), AppError> {
        self.sessions.write().await.remove(token_hash);
        Ok(())
    }
}

/// Issues, resolves and destroys session tokens.
///
/// Cheap to clone; all clones share the same store.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
}

impl SessionManager {
    /// Creates a session manager over the given store.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Creates a session manager persisting sessions in the database.
    pub fn database(db: DatabaseConnection) -> Self {
        Self::new(Arc::new(DbSessionStore::new(db)))
    }

    /// Creates a session manager keeping sessions in memory.
    pub fn memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Issues a new session for an account.
    ///
    /// A token whose hash collides with an existing session is discarded and a fresh
    /// one is generated.
    ///
    /// # Arguments
    /// - `account_id` - Account the session authenticates
    ///
    /// # Returns
    /// - `Ok(String)` - The plaintext session token; it is not retrievable later
    /// - `Err(AppError::InternalErr(IdentifierCollision))` - Every attempt collided
    /// - `Err(AppError)` - Store failure
    pub async fn create_session(&self, account_id: &str) -> Result<String, AppError> {
        for _ in 0..MAX_TOKEN_ATTEMPTS {
            let token = generate_session_token();

            if self
                .store
                .insert_if_absent(&hash_token(&token), account_id)
                .await?
            {
                tracing::debug!("Created session for account {}", account_id);
                return Ok(token);
            }

            tracing::warn!("Session token collided with an existing session, retrying");
        }

        Err(InternalError::IdentifierCollision("session token", MAX_TOKEN_ATTEMPTS).into())
    }

    /// Resolves a token to the account it belongs to.
    ///
    /// # Returns
    /// - `Ok(String)` - Account ID of the session
    /// - `Err(AppError::AuthErr(MissingToken))` - Empty token
    /// - `Err(AppError::AuthErr(InvalidSession))` - Unknown or destroyed token
    pub async fn resolve_session(&self, token: &str) -> Result<String, AppError> {
        if token.is_empty() {
            return Err(AuthError::MissingToken.into());
        }

        self.store
            .account_id(&hash_token(token))
            .await?
            .ok_or_else(|| AuthError::InvalidSession.into())
    }

    /// Destroys a session. Destroying an unknown token succeeds.
    pub async fn destroy_session(&self, token: &str) -> Result<(), AppError> {
        if token.is_empty() {
            return Ok(());
        }

        self.store.remove(&hash_token(token)).await
    }
}
