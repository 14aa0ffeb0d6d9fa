use axum::{extract::State, http::HeaderMap, response::IntoResponse};

use crate::{
    model::{
        api::{ApiSuccess, ErrorDto},
        upstream::{
            AccountQueryDto, CommandDto, CommandResultDto, LiveDataDto, TestConnectionDto,
            TestConnectionResultDto,
        },
    },
    server::{
        error::AppError,
        extract::{Json, Path, Query},
        middleware::auth::AuthGuard,
        model::{access::AccessLevel, upstream::UpstreamOperation},
        service::access::AccessService,
        state::AppState,
    },
};

/// Tag for grouping ER:LC proxy endpoints in OpenAPI documentation
pub static UPSTREAM_TAG: &str = "upstream";

/// Relay live data of a server from the ER:LC API.
///
/// `operation` is one of `server-info`, `players`, `staff`, `queue`, `joinlogs`,
/// `killlogs`, `commandlogs`, `modcalls`, `bans` or `vehicles`.
///
/// # Access Control
/// - `Member` - Owners and members of the server
///
/// # Returns
/// - `200 OK` - Upstream data under the read's key: `serverInfo`, `players`, `staff`,
///   `queue`, `logs` (all three log reads), `modcalls`, `bans` or `vehicles`
/// - `200 OK` with `success: false` - Server has no API key configured
/// - `403 Forbidden` - No access, or no such server
/// - `404 Not Found` - Unknown operation
/// - `502 Bad Gateway` / `504 Gateway Timeout` - Upstream failure
#[utoipa::path(
    get,
    path = "/api/upstream/{operation}/{server_id}",
    tag = UPSTREAM_TAG,
    params(
        ("operation" = String, Path, description = "Live read, e.g. `players`"),
        ("server_id" = String, Path, description = "Server ID"),
        ("accountId" = Option<String>, Query, description = "Caller's account ID")
    ),
    responses(
        (status = 200, description = "Upstream data, or NotConfigured failure", body = LiveDataDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "No access to this server", body = ErrorDto),
        (status = 404, description = "Unknown operation", body = ErrorDto),
        (status = 502, description = "Upstream error", body = ErrorDto),
        (status = 504, description = "Upstream timeout", body = ErrorDto)
    ),
)]
pub async fn live_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((operation, server_id)): Path<(String, String)>,
    Query(query): Query<AccountQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let Some(operation) = UpstreamOperation::from_segment(&operation) else {
        return Err(AppError::NotFound(format!(
            "Unknown live data operation: {}",
            operation
        )));
    };

    let caller = AuthGuard::new(&state.db, &state.sessions, state.auth_mode, &headers)
        .require(query.account_id.as_deref())
        .await?;

    let credentials = AccessService::new(&state.db, &state.cipher)
        .authorize_live(&caller.id, &server_id, AccessLevel::Member)
        .await?;

    let data = state.upstream.live_read(&credentials, operation).await?;

    Ok(Json(ApiSuccess::new(LiveDataDto::new(
        operation.response_key(),
        data,
    ))))
}

/// Run an in-game command on a server.
///
/// # Access Control
/// - `Owner` - Only the server owner
#[utoipa::path(
    post,
    path = "/api/upstream/command/{server_id}",
    tag = UPSTREAM_TAG,
    params(
        ("server_id" = String, Path, description = "Server ID")
    ),
    request_body = CommandDto,
    responses(
        (status = 200, description = "Upstream result, or NotConfigured failure", body = CommandResultDto),
        (status = 400, description = "Empty or overlong command", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not the owner", body = ErrorDto),
        (status = 502, description = "Upstream error", body = ErrorDto),
        (status = 504, description = "Upstream timeout", body = ErrorDto)
    ),
)]
pub async fn execute_command(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(server_id): Path<String>,
    Json(payload): Json<CommandDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.sessions, state.auth_mode, &headers)
        .require(payload.account_id.as_deref())
        .await?;

    let credentials = AccessService::new(&state.db, &state.cipher)
        .authorize_live(&caller.id, &server_id, AccessLevel::Owner)
        .await?;

    let result = state
        .upstream
        .execute_command(&credentials, &caller.id, &payload.command)
        .await?;

    Ok(Json(ApiSuccess::new(CommandResultDto { result })))
}

/// Check an API key before saving it.
#[utoipa::path(
    post,
    path = "/api/upstream/test-connection",
    tag = UPSTREAM_TAG,
    request_body = TestConnectionDto,
    responses(
        (status = 200, description = "Key accepted by the ER:LC API", body = TestConnectionResultDto),
        (status = 400, description = "Blank key", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 502, description = "Key rejected or upstream error", body = ErrorDto),
        (status = 504, description = "Upstream timeout", body = ErrorDto)
    ),
)]
pub async fn test_connection(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<TestConnectionDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.sessions, state.auth_mode, &headers)
        .require(payload.account_id.as_deref())
        .await?;

    let server_info = state.upstream.test_connection(&payload.api_key).await?;

    Ok(Json(ApiSuccess::new(TestConnectionResultDto { server_info })))
}
