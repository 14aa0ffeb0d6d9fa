use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The request carried no session token.
    #[error("Request has no session token")]
    MissingToken,

    /// The session token is unknown or was destroyed.
    ///
    /// Expired and never-issued tokens are not distinguished.
    #[error("Session token is not valid")]
    InvalidSession,

    /// The session (or trusted account id) refers to an account that does not exist.
    #[error("Account {0} does not exist")]
    AccountNotFound(String),

    /// Username/password pair did not match an account.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Signup with a username that is already registered.
    #[error("Username {0} is already taken")]
    UsernameTaken(String),

    /// The request names an `accountId` different from the authenticated caller.
    #[error("Account {claimed} does not match authenticated account {authenticated}")]
    AccountMismatch {
        claimed: String,
        authenticated: String,
    },

    /// CSRF state validation failed during OAuth callback.
    ///
    /// The state in the callback URL does not match the one stored in the cookie
    /// session, indicating a forged or replayed callback.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// Exchanging the authorization code with Discord failed.
    #[error("Failed to exchange OAuth2 authorization code: {0}")]
    OAuthExchange(String),

    /// Discord login was requested but no Discord credentials are configured.
    #[error("Discord login is not configured")]
    DiscordLoginDisabled,
}

/// Converts authentication errors into HTTP responses.
///
/// - `MissingToken` / `InvalidSession` / `AccountNotFound` / `InvalidCredentials` → 401
/// - `AccountMismatch` → 403
/// - `UsernameTaken` / `CsrfValidationFailed` / `OAuthExchange` → 400
/// - `DiscordLoginDisabled` → 404
///
/// Errors are logged at debug level; client-facing messages stay generic so that a
/// failed login does not reveal whether the username exists.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::MissingToken | Self::InvalidSession | Self::AccountNotFound(_) => {
                error_response(
                    StatusCode::UNAUTHORIZED,
                    "Unauthorized",
                    "UNAUTHORIZED",
                    "You must be logged in to do that.",
                )
            }
            Self::InvalidCredentials => error_response(
                StatusCode::UNAUTHORIZED,
                "Unauthorized",
                "UNAUTHORIZED",
                "Invalid username or password.",
            ),
            Self::AccountMismatch { .. } => error_response(
                StatusCode::FORBIDDEN,
                "Forbidden",
                "FORBIDDEN",
                "You cannot act on behalf of another account.",
            ),
            Self::UsernameTaken(_) => error_response(
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "USERNAME_TAKEN",
                "That username is already taken.",
            ),
            Self::CsrfValidationFailed | Self::OAuthExchange(_) => error_response(
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "LOGIN_FAILED",
                "There was an issue logging you in, please try again.",
            ),
            Self::DiscordLoginDisabled => error_response(
                StatusCode::NOT_FOUND,
                "NotFound",
                "NOT_FOUND",
                "Discord login is not available.",
            ),
        }
    }
}
