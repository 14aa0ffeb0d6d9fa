use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::server::{
    config::AuthMode,
    data::account::AccountRepository,
    error::{auth::AuthError, AppError},
    model::account::Account,
    service::session::SessionManager,
};

/// Extracts the session token from the `Authorization` header.
///
/// Accepts both a raw token and `Bearer <token>`.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();

    (!token.is_empty()).then_some(token)
}

/// Establishes which account a request acts as.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    sessions: &'a SessionManager,
    auth_mode: AuthMode,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        sessions: &'a SessionManager,
        auth_mode: AuthMode,
        headers: &'a HeaderMap,
    ) -> Self {
        Self {
            db,
            sessions,
            auth_mode,
            headers,
        }
    }

    /// Resolves the calling account.
    ///
    /// When the request also names an account (`accountId` in query or body), it must
    /// be the authenticated one. With `AuthMode::TrustAccountId` a request without a
    /// token is attributed to the named account.
    ///
    /// # Arguments
    /// - `claimed_account_id` - Account named by the request, if any
    ///
    /// # Returns
    /// - `Ok(Account)` - The calling account
    /// - `Err(AuthError::MissingToken)` - No token and nothing to trust
    /// - `Err(AuthError::InvalidSession)` - Unknown or destroyed token
    /// - `Err(AuthError::AccountMismatch)` - Named account differs from the session's
    /// - `Err(AuthError::AccountNotFound)` - Account no longer exists
    pub async fn require(&self, claimed_account_id: Option<&str>) -> Result<Account, AppError> {
        let claimed = claimed_account_id.filter(|id| !id.is_empty());

        let account_id = match session_token(self.headers) {
            Some(token) => {
                let account_id = self.sessions.resolve_session(token).await?;
                if let Some(claimed) = claimed {
                    if claimed != account_id {
                        return Err(AuthError::AccountMismatch {
                            claimed: claimed.to_string(),
                            authenticated: account_id,
                        }
                        .into());
                    }
                }
                account_id
            }
            None => match (self.auth_mode, claimed) {
                (AuthMode::TrustAccountId, Some(claimed)) => {
                    tracing::warn!(
                        "Trusting unauthenticated accountId {} (AUTH_MODE=trust-account-id)",
                        claimed
                    );
                    claimed.to_string()
                }
                _ => return Err(AuthError::MissingToken.into()),
            },
        };

        let Some(account) = AccountRepository::new(self.db)
            .find_by_id(&account_id)
            .await?
        else {
            return Err(AuthError::AccountNotFound(account_id).into());
        };

        Ok(account)
    }
}
