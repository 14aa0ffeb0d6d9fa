use axum::{extract::State, http::HeaderMap, response::IntoResponse};

use crate::{
    model::{
        account::AccountDto,
        api::{ApiSuccess, ErrorDto},
    },
    server::{
        error::AppError,
        extract::{Json, Path},
        middleware::auth::AuthGuard,
        service::account::AccountService,
        state::AppState,
    },
};

/// Tag for grouping account endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

/// Get the caller's profile with owned and member server IDs.
#[utoipa::path(
    get,
    path = "/api/user",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Caller's profile", body = AccountDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.sessions, state.auth_mode, &headers)
        .require(None)
        .await?;

    let profile = AccountService::new(&state.db).profile(&caller.id).await?;

    Ok(Json(ApiSuccess::new(profile.into_dto())))
}

/// Get an account's profile.
///
/// # Access Control
/// - The path account must be the authenticated caller
///
/// # Returns
/// - `200 OK` - Account profile
/// - `401 Unauthorized` - Not authenticated
/// - `403 Forbidden` - Path account is not the caller
#[utoipa::path(
    get,
    path = "/api/user/{account_id}",
    tag = USER_TAG,
    params(
        ("account_id" = String, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account profile", body = AccountDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Account is not the caller", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_by_id(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(account_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.sessions, state.auth_mode, &headers)
        .require(Some(&account_id))
        .await?;

    let profile = AccountService::new(&state.db).profile(&caller.id).await?;

    Ok(Json(ApiSuccess::new(profile.into_dto())))
}
