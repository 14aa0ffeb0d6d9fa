use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{model::api::UpstreamStatusDto, server::error::error_response_with_upstream};

/// Failures of a call to the upstream game-server API.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The upstream answered with a non-success status.
    #[error("Upstream responded with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The upstream did not answer within the configured timeout.
    #[error("Upstream request timed out")]
    Timeout,

    /// The request could not be sent (DNS, connection refused, TLS, ...).
    #[error("Failed to reach upstream: {0}")]
    Transport(String),

    /// A success response carried a body that is not valid JSON.
    #[error("Failed to decode upstream response: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// Status reported to the client in the `upstreamStatus` field.
    pub fn upstream_status(&self) -> Option<UpstreamStatusDto> {
        match self {
            Self::Status { status, .. } => Some(UpstreamStatusDto::Code(*status)),
            Self::Timeout => Some(UpstreamStatusDto::Label("timeout".to_string())),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Converts upstream errors into HTTP responses.
///
/// - `Timeout` → 504 Gateway Timeout with `upstreamStatus: "timeout"`
/// - everything else → 502 Bad Gateway, with the upstream status when there is one
///
/// The upstream message is relayed for `Status` errors since it usually explains the
/// problem (invalid key, server offline); transport details are only logged.
impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        tracing::warn!("{}", self);

        let upstream_status = self.upstream_status();
        match self {
            Self::Timeout => error_response_with_upstream(
                StatusCode::GATEWAY_TIMEOUT,
                "UpstreamError",
                "UPSTREAM_TIMEOUT",
                "The ER:LC API did not respond in time.",
                upstream_status,
            ),
            Self::Status { message, .. } => error_response_with_upstream(
                StatusCode::BAD_GATEWAY,
                "UpstreamError",
                "UPSTREAM_ERROR",
                message,
                upstream_status,
            ),
            Self::Transport(_) | Self::Decode(_) => error_response_with_upstream(
                StatusCode::BAD_GATEWAY,
                "UpstreamError",
                "UPSTREAM_ERROR",
                "The ER:LC API could not be reached.",
                upstream_status,
            ),
        }
    }
}
