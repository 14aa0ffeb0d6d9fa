use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Successful response envelope.
///
/// Flattens the payload next to `success: true` so clients can check a single
/// field before reading the rest of the body.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiSuccess<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T> ApiSuccess<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Failure envelope returned by every endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDto {
    /// Always `false`.
    pub success: bool,
    /// Error kind, e.g. `Forbidden` or `NotConfigured`.
    pub error: String,
    /// Stable machine-readable code, e.g. `NOT_CONFIGURED`.
    pub code: String,
    /// Human readable description safe to show to the user.
    pub message: String,
    /// Status reported by the upstream service, when the failure came from it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<UpstreamStatusDto>,
}

/// Upstream status: the HTTP status code, or `"timeout"`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(untagged)]
pub enum UpstreamStatusDto {
    Code(u16),
    Label(String),
}

/// Body of `GET /api/health`.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct HealthDto {
    pub status: String,
}
