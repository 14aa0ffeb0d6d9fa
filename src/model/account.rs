use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /auth/signup` and `POST /auth/login`.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CredentialsDto {
    pub username: String,
    pub password: String,
}

/// Body of `POST /auth/check-password`, used after a Discord login.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckPasswordDto {
    #[serde(alias = "accountID", alias = "id")]
    pub account_id: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponseDto {
    pub account_id: String,
}

/// Returned whenever a session is issued.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub account_id: String,
    pub session_token: String,
}

/// Result of the Discord OAuth callback.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscordLoginDto {
    pub account_id: String,
    pub username: String,
    /// Whether the account already has a password; if not, the next
    /// `check-password` call from this browser sets it.
    pub password_set: bool,
}

/// Account profile with its server memberships.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub account_id: String,
    pub username: String,
    pub discord_id: Option<String>,
    pub owned_server_ids: Vec<String>,
    pub member_server_ids: Vec<String>,
}
