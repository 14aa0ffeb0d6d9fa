//! Authorization gate for per-server operations.
//!
//! Every server-scoped endpoint passes through `AccessService` before touching the server:
//!
//! 1. The server must exist (`ServerNotFound`, rendered as 403).
//! 2. The caller's account must exist (`AccountNotFound`, rendered as 401).
//! 3. The caller's access level must satisfy the requirement (`Forbidden`).
//! 4. Live operations additionally need a configured API key (`NotConfigured`).
//!
//! The upstream client is only ever called with credentials returned by
//! `authorize_live`, so a server without a key can never reach the upstream API.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        account::AccountRepository, server::ServerRepository,
        server_access::ServerAccessRepository,
    },
    error::{access::AccessError, auth::AuthError, AppError},
    model::access::{AccessLevel, ServerAccess, UpstreamCredentials},
    util::crypto::ApiKeyCipher,
};

pub struct AccessService<'a> {
    db: &'a DatabaseConnection,
    cipher: &'a ApiKeyCipher,
}

impl<'a> AccessService<'a> {
    /// Creates a new AccessService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `cipher` - Cipher used to decrypt stored API keys for live operations
    ///
    /// # Returns
    /// - `AccessService` - New service instance
    pub fn new(db: &'a DatabaseConnection, cipher: &'a ApiKeyCipher) -> Self {
        Self { db, cipher }
    }

    /// Checks that an account may act on a server at the required level.
    ///
    /// # Arguments
    /// - `account_id` - Authenticated caller
    /// - `server_id` - Target server
    /// - `required` - `AccessLevel::Owner` or `AccessLevel::Member`
    ///
    /// # Returns
    /// - `Ok(ServerAccess)` - The server and the caller's level on it
    /// - `Err(AppError::AccessErr(ServerNotFound))` - No such server
    /// - `Err(AppError::AuthErr(AccountNotFound))` - The caller's account does not exist
    /// - `Err(AppError::AccessErr(Forbidden))` - Caller's level is insufficient
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn authorize(
        &self,
        account_id: &str,
        server_id: &str,
        required: AccessLevel,
    ) -> Result<ServerAccess, AppError> {
        let Some(server) = ServerRepository::new(self.db).find_by_id(server_id).await? else {
            return Err(AccessError::ServerNotFound(server_id.to_string()).into());
        };

        if AccountRepository::new(self.db)
            .find_by_id(account_id)
            .await?
            .is_none()
        {
            return Err(AuthError::AccountNotFound(account_id.to_string()).into());
        }

        let level = ServerAccessRepository::new(self.db)
            .access_level(account_id, server_id)
            .await?;

        if !level.satisfies(required) {
            return Err(AccessError::Forbidden {
                account_id: account_id.to_string(),
                server_id: server_id.to_string(),
                required,
            }
            .into());
        }

        Ok(ServerAccess { server, level })
    }

    /// Authorizes a live operation and returns the upstream credentials.
    ///
    /// Runs `authorize` first, so an unrelated caller gets `Forbidden` even when the
    /// server has no key.
    ///
    /// # Returns
    /// - `Ok(UpstreamCredentials)` - External server ID and decrypted API key
    /// - `Err(AppError::AccessErr(NotConfigured))` - Caller may use the server but no key is set
    /// - `Err(AppError::InternalErr(Decryption))` - Stored key cannot be decrypted
    /// - any error of `authorize`
    pub async fn authorize_live(
        &self,
        account_id: &str,
        server_id: &str,
        required: AccessLevel,
    ) -> Result<UpstreamCredentials, AppError> {
        let access = self.authorize(account_id, server_id, required).await?;

        let Some(encrypted) = access
            .server
            .api_key_encrypted
            .as_deref()
            .filter(|key| !key.is_empty())
        else {
            return Err(AccessError::NotConfigured(server_id.to_string()).into());
        };

        let api_key = self.cipher.decrypt(encrypted)?;

        Ok(UpstreamCredentials {
            server_id: access.server.id,
            external_server_id: access.server.erlc_server_id,
            api_key,
        })
    }
}
