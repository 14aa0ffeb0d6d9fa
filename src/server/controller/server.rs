use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::{
    model::{
        api::{ApiSuccess, ErrorDto},
        server::{
            AccountRefDto, AddMemberDto, CreateServerDto, CreateServerResponseDto,
            MemberChangeDto, MemberListDto, ServerListDto, ServerSettingsDto,
            UpdateServerSettingsDto,
        },
        upstream::AccountQueryDto,
    },
    server::{
        error::AppError,
        extract::{Json, Path, Query},
        middleware::auth::AuthGuard,
        model::access::AccessLevel,
        service::server::{CreateServerInput, ServerService, UpdateSettingsInput},
        state::AppState,
    },
};

/// Tag for grouping server endpoints in OpenAPI documentation
pub static SERVER_TAG: &str = "server";

/// Picks the claimed account ID from the body, falling back to the query string.
fn claimed_account_id(body: Option<Json<AccountRefDto>>, query: AccountQueryDto) -> Option<String> {
    body.and_then(|Json(body)| body.account_id)
        .or(query.account_id)
}

/// Create a server owned by the caller.
///
/// Creates the server and its owner relation in one transaction. The optional API key
/// is encrypted before it is stored.
///
/// # Access Control
/// - Authenticated caller; `accountId`, when given, must be the caller
///
/// # Returns
/// - `201 Created` - ID of the new server
/// - `400 Bad Request` - Invalid name, unknown plan or undecodable body
/// - `401 Unauthorized` - Not authenticated
/// - `403 Forbidden` - `accountId` is not the caller
#[utoipa::path(
    post,
    path = "/api/servers/create",
    tag = SERVER_TAG,
    request_body = CreateServerDto,
    responses(
        (status = 201, description = "Server created", body = CreateServerResponseDto),
        (status = 400, description = "Invalid server data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "accountId is not the caller", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_server(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateServerDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.sessions, state.auth_mode, &headers)
        .require(payload.account_id.as_deref())
        .await?;

    let server = ServerService::new(&state.db, &state.cipher)
        .create(
            &caller.id,
            CreateServerInput {
                name: payload.name,
                description: payload.description,
                api_key: payload.api_key,
                erlc_server_id: payload.erlc_server_id,
                plan: payload.plan,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiSuccess::new(CreateServerResponseDto {
            server_id: server.id,
        })),
    ))
}

/// List the servers an account owns and is a member of.
#[utoipa::path(
    get,
    path = "/api/servers/user/{account_id}",
    tag = SERVER_TAG,
    params(
        ("account_id" = String, Path, description = "Account ID, must be the caller")
    ),
    responses(
        (status = 200, description = "Owned and member servers", body = ServerListDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Account is not the caller", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_servers_for_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(account_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.sessions, state.auth_mode, &headers)
        .require(Some(&account_id))
        .await?;

    let servers = ServerService::new(&state.db, &state.cipher)
        .list_for_account(&caller.id)
        .await?;

    Ok(Json(ApiSuccess::new(ServerListDto {
        owned_servers: servers
            .owned
            .into_iter()
            .map(|server| server.into_dto(AccessLevel::Owner))
            .collect(),
        member_servers: servers
            .member
            .into_iter()
            .map(|server| server.into_dto(AccessLevel::Member))
            .collect(),
    })))
}

/// Get a server's settings.
///
/// The API key is never returned, only whether one is configured.
///
/// # Access Control
/// - `Member` - Owners and members of the server
///
/// # Returns
/// - `200 OK` - Server settings with the caller's role
/// - `401 Unauthorized` - Not authenticated
/// - `403 Forbidden` - No access, or no such server
#[utoipa::path(
    get,
    path = "/api/servers/{server_id}/settings",
    tag = SERVER_TAG,
    params(
        ("server_id" = String, Path, description = "Server ID"),
        ("accountId" = Option<String>, Query, description = "Caller's account ID")
    ),
    responses(
        (status = 200, description = "Server settings", body = ServerSettingsDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "No access to this server", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(server_id): Path<String>,
    Query(query): Query<AccountQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.sessions, state.auth_mode, &headers)
        .require(query.account_id.as_deref())
        .await?;

    let access = ServerService::new(&state.db, &state.cipher)
        .settings(&caller.id, &server_id)
        .await?;

    Ok(Json(ApiSuccess::new(ServerSettingsDto {
        server: access.server.into_dto(access.level),
    })))
}

/// Update a server's settings.
///
/// Absent fields are left unchanged; an empty description or ER:LC server ID clears
/// it. A new API key replaces the stored one.
///
/// # Access Control
/// - `Owner` - Only the server owner
///
/// # Returns
/// - `200 OK` - Updated settings
/// - `400 Bad Request` - Invalid name, blank API key or unknown plan
/// - `401 Unauthorized` - Not authenticated
/// - `403 Forbidden` - Caller is not the owner, or no such server
#[utoipa::path(
    put,
    path = "/api/servers/{server_id}/settings",
    tag = SERVER_TAG,
    params(
        ("server_id" = String, Path, description = "Server ID")
    ),
    request_body = UpdateServerSettingsDto,
    responses(
        (status = 200, description = "Updated server settings", body = ServerSettingsDto),
        (status = 400, description = "Invalid settings", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not the owner", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(server_id): Path<String>,
    Json(payload): Json<UpdateServerSettingsDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.sessions, state.auth_mode, &headers)
        .require(payload.account_id.as_deref())
        .await?;

    let server = ServerService::new(&state.db, &state.cipher)
        .update_settings(
            &caller.id,
            &server_id,
            UpdateSettingsInput {
                name: payload.name,
                description: payload.description,
                api_key: payload.api_key,
                erlc_server_id: payload.erlc_server_id,
                plan: payload.plan,
            },
        )
        .await?;

    Ok(Json(ApiSuccess::new(ServerSettingsDto {
        server: server.into_dto(AccessLevel::Owner),
    })))
}

/// Delete a server together with all of its access relations.
#[utoipa::path(
    delete,
    path = "/api/servers/{server_id}/delete",
    tag = SERVER_TAG,
    params(
        ("server_id" = String, Path, description = "Server ID")
    ),
    request_body(content = AccountRefDto, description = "Caller's account ID"),
    responses(
        (status = 200, description = "Server deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not the owner", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_server(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(server_id): Path<String>,
    Query(query): Query<AccountQueryDto>,
    body: Option<Json<AccountRefDto>>,
) -> Result<impl IntoResponse, AppError> {
    let claimed = claimed_account_id(body, query);
    let caller = AuthGuard::new(&state.db, &state.sessions, state.auth_mode, &headers)
        .require(claimed.as_deref())
        .await?;

    ServerService::new(&state.db, &state.cipher)
        .delete(&caller.id, &server_id)
        .await?;

    Ok(Json(ApiSuccess::new(serde_json::json!({}))))
}

/// List the owner and members of a server.
#[utoipa::path(
    get,
    path = "/api/servers/{server_id}/members",
    tag = SERVER_TAG,
    params(
        ("server_id" = String, Path, description = "Server ID"),
        ("accountId" = Option<String>, Query, description = "Caller's account ID")
    ),
    responses(
        (status = 200, description = "Owner first, then members", body = MemberListDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "No access to this server", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_members(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(server_id): Path<String>,
    Query(query): Query<AccountQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.sessions, state.auth_mode, &headers)
        .require(query.account_id.as_deref())
        .await?;

    let members = ServerService::new(&state.db, &state.cipher)
        .members(&caller.id, &server_id)
        .await?;

    Ok(Json(ApiSuccess::new(MemberListDto {
        members: members.into_iter().map(|member| member.into_dto()).collect(),
    })))
}

/// Add an account as member of a server, by username.
///
/// Adding an existing member or the owner is a no-op reported as `changed: false`.
///
/// # Access Control
/// - `Owner` - Only the server owner
///
/// # Returns
/// - `200 OK` - Whether a membership was added
/// - `403 Forbidden` - Caller is not the owner, or no such server
/// - `404 Not Found` - No account with that username
#[utoipa::path(
    post,
    path = "/api/servers/{server_id}/members",
    tag = SERVER_TAG,
    params(
        ("server_id" = String, Path, description = "Server ID")
    ),
    request_body = AddMemberDto,
    responses(
        (status = 200, description = "Membership added or already present", body = MemberChangeDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not the owner", body = ErrorDto),
        (status = 404, description = "No account with that username", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(server_id): Path<String>,
    Json(payload): Json<AddMemberDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.sessions, state.auth_mode, &headers)
        .require(payload.account_id.as_deref())
        .await?;

    let changed = ServerService::new(&state.db, &state.cipher)
        .add_member(&caller.id, &server_id, &payload.username)
        .await?;

    Ok(Json(ApiSuccess::new(MemberChangeDto { changed })))
}

/// Remove a member from a server. The owner cannot be removed.
#[utoipa::path(
    delete,
    path = "/api/servers/{server_id}/members/{member_id}",
    tag = SERVER_TAG,
    params(
        ("server_id" = String, Path, description = "Server ID"),
        ("member_id" = String, Path, description = "Account ID of the member to remove")
    ),
    request_body(content = AccountRefDto, description = "Caller's account ID"),
    responses(
        (status = 200, description = "Membership removed or already absent", body = MemberChangeDto),
        (status = 400, description = "Attempt to remove the owner", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not the owner", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((server_id, member_id)): Path<(String, String)>,
    Query(query): Query<AccountQueryDto>,
    body: Option<Json<AccountRefDto>>,
) -> Result<impl IntoResponse, AppError> {
    let claimed = claimed_account_id(body, query);
    let caller = AuthGuard::new(&state.db, &state.sessions, state.auth_mode, &headers)
        .require(claimed.as_deref())
        .await?;

    let changed = ServerService::new(&state.db, &state.cipher)
        .remove_member(&caller.id, &server_id, &member_id)
        .await?;

    Ok(Json(ApiSuccess::new(MemberChangeDto { changed })))
}
