//! Account domain models and parameters.
//!
//! An account is identified by a generated `ACC-…` id and logs in with a unique
//! username. A Discord user id may be linked as a second way to log in.

use chrono::{DateTime, Utc};

use crate::model::account::AccountDto;

/// Registered account.
#[derive(Clone, PartialEq)]
pub struct Account {
    /// Generated account ID (`ACC-…`).
    pub id: String,
    /// Unique login name.
    pub username: String,
    /// bcrypt hash; `None` for Discord accounts that have not set a password yet.
    pub password_hash: Option<String>,
    /// Linked Discord user ID, if the account was created or linked through Discord.
    pub discord_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Converts an entity model to an account domain model at the repository boundary.
    pub fn from_entity(entity: entity::account::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            password_hash: entity.password_hash,
            discord_id: entity.discord_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &self.password_hash.as_ref().map(|_| "[REDACTED]"))
            .field("discord_id", &self.discord_id)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Account together with the servers it owns and is a member of.
#[derive(Debug, Clone)]
pub struct AccountProfile {
    pub account: Account,
    pub owned_server_ids: Vec<String>,
    pub member_server_ids: Vec<String>,
}

impl AccountProfile {
    /// Converts the profile to a DTO for API responses.
    ///
    /// # Returns
    /// - `AccountDto` - Profile without any credential material
    pub fn into_dto(self) -> AccountDto {
        AccountDto {
            account_id: self.account.id,
            username: self.account.username,
            discord_id: self.account.discord_id,
            owned_server_ids: self.owned_server_ids,
            member_server_ids: self.member_server_ids,
        }
    }
}

/// Parameters for creating a new account.
#[derive(Clone)]
pub struct CreateAccountParam {
    pub id: String,
    pub username: String,
    pub password_hash: Option<String>,
    pub discord_id: Option<String>,
}

/// Parameters for creating or refreshing an account from a Discord login.
#[derive(Debug, Clone)]
pub struct UpsertDiscordAccountParam {
    /// ID used only when no account is linked to `discord_id` yet.
    pub new_account_id: String,
    pub discord_id: String,
    /// Discord username; refreshed on every login.
    pub username: String,
}
