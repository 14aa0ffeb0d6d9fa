use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::{error::error_response, model::access::AccessLevel};

/// Errors produced by the per-server authorization gate.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AccessError {
    /// No server exists with the requested ID.
    #[error("Server {0} not found")]
    ServerNotFound(String),

    /// The caller's access level on the server is below the required level.
    #[error("Account {account_id} lacks {required:?} access to server {server_id}")]
    Forbidden {
        account_id: String,
        server_id: String,
        required: AccessLevel,
    },

    /// The caller may use the server, but no upstream API key is configured yet.
    #[error("Server {0} has no API key configured")]
    NotConfigured(String),
}

/// Converts access errors into HTTP responses.
///
/// - `ServerNotFound` / `Forbidden` → 403 with an identical body, so a caller without
///   access cannot tell whether a server ID exists
/// - `NotConfigured` → 200 with `success: false`; it is an expected state that the
///   dashboard handles by prompting for setup
impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        match self {
            Self::ServerNotFound(_) | Self::Forbidden { .. } => {
                tracing::debug!("{}", self);
                error_response(
                    StatusCode::FORBIDDEN,
                    "Forbidden",
                    "FORBIDDEN",
                    "You do not have access to this server.",
                )
            }
            Self::NotConfigured(_) => error_response(
                StatusCode::OK,
                "NotConfigured",
                "NOT_CONFIGURED",
                "This server has no ER:LC API key configured yet.",
            ),
        }
    }
}
