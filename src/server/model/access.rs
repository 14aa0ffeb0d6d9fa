//! Access levels and the results of the authorization gate.

use entity::server_access::AccessRole;

use crate::server::model::server::Server;

/// An account's relation to a server.
///
/// Ordered so that `Owner > Member > NoAccess`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AccessLevel {
    NoAccess,
    Member,
    Owner,
}

impl AccessLevel {
    /// Maps the stored role of an access row, or its absence, to a level.
    pub fn from_role(role: Option<AccessRole>) -> Self {
        match role {
            Some(AccessRole::Owner) => Self::Owner,
            Some(AccessRole::Member) => Self::Member,
            None => Self::NoAccess,
        }
    }

    /// Whether this level is enough for an operation requiring `required`.
    ///
    /// `NoAccess` never satisfies anything, even a `NoAccess` requirement.
    pub fn satisfies(self, required: AccessLevel) -> bool {
        self != Self::NoAccess && self >= required
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Member => "member",
            Self::NoAccess => "none",
        }
    }
}

/// A server the caller was authorized for, with the caller's level on it.
#[derive(Debug, Clone)]
pub struct ServerAccess {
    pub server: Server,
    pub level: AccessLevel,
}

/// Everything the upstream client needs to act on a server.
#[derive(Clone)]
pub struct UpstreamCredentials {
    pub server_id: String,
    pub external_server_id: Option<String>,
    pub api_key: String,
}

impl std::fmt::Debug for UpstreamCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamCredentials")
            .field("server_id", &self.server_id)
            .field("external_server_id", &self.external_server_id)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
