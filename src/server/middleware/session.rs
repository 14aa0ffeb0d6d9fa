//! Discord login state kept in the tower-sessions cookie.
//!
//! API requests authenticate with a session token header, never with this cookie. The
//! cookie only carries two values across the Discord round trip:
//!
//! - the OAuth `state` issued by `/auth/discord/login`, consumed by the callback
//! - the account the callback resolved, which is the only account the same browser may
//!   give a first password through `/auth/check-password`

use tower_sessions::Session;

use crate::server::error::AppError;

const DISCORD_OAUTH_STATE: &str = "discord:oauth_state";
const DISCORD_LINKED_ACCOUNT: &str = "discord:linked_account";

/// OAuth `state` parameter between the redirect to Discord and the callback.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Remembers the state sent to Discord, replacing any earlier one.
    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(DISCORD_OAUTH_STATE, token).await?;
        Ok(())
    }

    /// Removes and returns the remembered state. A state validates at most once.
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        Ok(self.session.remove(DISCORD_OAUTH_STATE).await?)
    }
}

/// Account resolved by the last completed Discord callback in this browser.
///
/// `check_password` only sets a first password for this account; an account ID taken
/// from the request body alone is not enough.
pub struct LinkedAccountSession<'a> {
    session: &'a Session,
}

impl<'a> LinkedAccountSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set_account_id(&self, account_id: &str) -> Result<(), AppError> {
        self.session
            .insert(DISCORD_LINKED_ACCOUNT, account_id.to_string())
            .await?;
        Ok(())
    }

    /// # Returns
    /// - `Ok(Some(account_id))` - A Discord callback completed in this session
    /// - `Ok(None)` - No Discord login in this session, or the link was cleared
    /// - `Err(AppError::SessionErr(_))` - Session store failure
    pub async fn account_id(&self) -> Result<Option<String>, AppError> {
        Ok(self.session.get(DISCORD_LINKED_ACCOUNT).await?)
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        self.session.remove::<String>(DISCORD_LINKED_ACCOUNT).await?;
        Ok(())
    }
}
