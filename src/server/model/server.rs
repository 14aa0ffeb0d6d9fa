//! Server domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::server::{MemberDto, ServerDto},
    server::model::access::AccessLevel,
};

/// A managed ER:LC game server.
#[derive(Debug, Clone, PartialEq)]
pub struct Server {
    /// Generated server ID (`SRV-…`).
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner_account_id: String,
    /// Server ID on the ER:LC side. Informational; the API key selects the server upstream.
    pub erlc_server_id: Option<String>,
    /// Encrypted API key. Never leaves the service layer in plaintext except to the
    /// upstream client.
    pub api_key_encrypted: Option<String>,
    pub plan: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Server {
    /// Converts an entity model to a server domain model at the repository boundary.
    pub fn from_entity(entity: entity::server::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            owner_account_id: entity.owner_account_id,
            erlc_server_id: entity.erlc_server_id,
            api_key_encrypted: entity.api_key_encrypted,
            plan: entity.plan,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Whether live operations are possible for this server.
    pub fn api_key_configured(&self) -> bool {
        self.api_key_encrypted
            .as_deref()
            .is_some_and(|key| !key.is_empty())
    }

    /// Converts the server to a DTO as seen by a caller with the given access level.
    ///
    /// # Arguments
    /// - `role` - Caller's access level on this server
    ///
    /// # Returns
    /// - `ServerDto` - Server settings with only an `apiKeyConfigured` flag for the key
    pub fn into_dto(self, role: AccessLevel) -> ServerDto {
        ServerDto {
            api_key_configured: self.api_key_configured(),
            id: self.id,
            name: self.name,
            description: self.description,
            owner_account_id: self.owner_account_id,
            erlc_server_id: self.erlc_server_id,
            plan: self.plan,
            role: role.as_str().to_string(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Subscription plan of a server, stored by its lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServerPlan {
    #[default]
    Free,
    Premium,
}

impl ServerPlan {
    /// Parses a plan name, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "free" => Some(Self::Free),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Premium => "premium",
        }
    }
}

/// Parameters for creating a server.
#[derive(Debug, Clone)]
pub struct CreateServerParam {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner_account_id: String,
    pub erlc_server_id: Option<String>,
    pub api_key_encrypted: Option<String>,
    pub plan: ServerPlan,
}

/// Parameters for updating server settings.
///
/// `None` leaves a field unchanged. For the nullable columns, `Some(None)` clears them.
#[derive(Debug, Clone, Default)]
pub struct UpdateServerSettingsParam {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub erlc_server_id: Option<Option<String>>,
    pub api_key_encrypted: Option<String>,
    pub plan: Option<ServerPlan>,
}

/// Account with access to a server, as listed to the owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub account_id: String,
    pub username: String,
    pub level: AccessLevel,
}

impl Member {
    pub fn into_dto(self) -> MemberDto {
        MemberDto {
            account_id: self.account_id,
            username: self.username,
            role: self.level.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests plan name parsing.
    ///
    /// Expected: known names in any case, None for anything else
    #[test]
    fn parses_plan_names() {
        assert_eq!(ServerPlan::parse("free"), Some(ServerPlan::Free));
        assert_eq!(ServerPlan::parse(" Premium "), Some(ServerPlan::Premium));
        assert_eq!(ServerPlan::parse("enterprise"), None);
        assert_eq!(ServerPlan::parse(""), None);
        assert_eq!(ServerPlan::default().as_str(), "free");
    }
}
