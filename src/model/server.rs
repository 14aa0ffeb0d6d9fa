use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /api/servers/create`.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServerDto {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub erlc_server_id: Option<String>,
    /// `free` (default) or `premium`.
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default, alias = "accountID")]
    pub account_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServerResponseDto {
    pub server_id: String,
}

/// Body of `PUT /api/servers/{id}/settings`. Absent fields are left unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServerSettingsDto {
    #[serde(default, alias = "accountID")]
    pub account_id: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub erlc_server_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// `free` or `premium`.
    #[serde(default)]
    pub plan: Option<String>,
}

/// Body of owner-only mutations that only carry the caller's account id.
#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountRefDto {
    #[serde(default, alias = "accountID")]
    pub account_id: Option<String>,
}

/// Body of `POST /api/servers/{id}/members`.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberDto {
    #[serde(default, alias = "accountID")]
    pub account_id: Option<String>,
    /// Username of the account to add as member.
    pub username: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberDto {
    pub account_id: String,
    pub username: String,
    pub role: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberListDto {
    pub members: Vec<MemberDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberChangeDto {
    /// `false` when the request was a no-op (already a member / not a member).
    pub changed: bool,
}

/// Server settings as exposed to clients. The API key itself is never included.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner_account_id: String,
    pub erlc_server_id: Option<String>,
    pub plan: String,
    pub api_key_configured: bool,
    /// Caller's access level on this server: `owner` or `member`.
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ServerSettingsDto {
    pub server: ServerDto,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerListDto {
    pub owned_servers: Vec<ServerDto>,
    pub member_servers: Vec<ServerDto>,
}
