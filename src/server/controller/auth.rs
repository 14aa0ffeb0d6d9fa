use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        account::{CheckPasswordDto, CredentialsDto, DiscordLoginDto, SessionDto, SignupResponseDto},
        api::{ApiSuccess, ErrorDto},
    },
    server::{
        error::{auth::AuthError, AppError},
        extract::{Json, Query},
        middleware::{
            auth::session_token,
            session::{CsrfSession, LinkedAccountSession},
        },
        service::{auth::AuthService, discord::DiscordAuthService},
        state::{AppState, DiscordLogin},
    },
};

/// Tag for grouping authentication endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Query parameters for the Discord OAuth callback endpoint.
#[derive(Deserialize)]
pub struct CallbackParams {
    /// CSRF state token to be validated against the cookie session value.
    pub state: String,
    /// Authorization code from Discord for token exchange.
    pub code: String,
}

#[derive(Deserialize)]
pub struct LogoutParams {
    #[serde(default)]
    pub token: Option<String>,
}

/// Register a new account.
///
/// # Returns
/// - `201 Created` - Account created; the caller logs in separately
/// - `400 Bad Request` - Invalid username or password, or username taken
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = AUTH_TAG,
    request_body = CredentialsDto,
    responses(
        (status = 201, description = "Account created", body = SignupResponseDto),
        (status = 400, description = "Invalid credentials or username taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsDto>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthService::new(&state.db, &state.sessions)
        .signup(&payload.username, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiSuccess::new(SignupResponseDto {
            account_id: account.id,
        })),
    ))
}

/// Log in with username and password.
///
/// Issues a session token to send in the `Authorization` header of later requests.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = AUTH_TAG,
    request_body = CredentialsDto,
    responses(
        (status = 200, description = "Session issued", body = SessionDto),
        (status = 401, description = "Invalid username or password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsDto>,
) -> Result<impl IntoResponse, AppError> {
    let (account, session_token) = AuthService::new(&state.db, &state.sessions)
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(ApiSuccess::new(SessionDto {
        account_id: account.id,
        session_token,
    })))
}

/// Destroy a session and redirect to the site root.
///
/// The token is taken from the `token` query parameter, falling back to the
/// `Authorization` header. Unknown tokens are ignored.
#[utoipa::path(
    get,
    path = "/auth/logout",
    tag = AUTH_TAG,
    params(
        ("token" = Option<String>, Query, description = "Session token to destroy")
    ),
    responses(
        (status = 303, description = "Session destroyed, redirect to /"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<LogoutParams>,
) -> Result<impl IntoResponse, AppError> {
    let token = params
        .token
        .as_deref()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .or_else(|| session_token(&headers));

    if let Some(token) = token {
        AuthService::new(&state.db, &state.sessions)
            .logout(token)
            .await?;
    }

    Ok(Redirect::to("/"))
}

/// Set or verify the password of an account and issue a session.
///
/// Accounts created through Discord login have no password; the first call sets it,
/// but only from the browser whose Discord callback resolved that account. Later calls
/// verify it.
///
/// # Returns
/// - `200 OK` - Session issued
/// - `400 Bad Request` - First password too short
/// - `401 Unauthorized` - Unknown account, wrong password, or a first password without
///   the account's Discord login in this cookie session
#[utoipa::path(
    post,
    path = "/auth/check-password",
    tag = AUTH_TAG,
    request_body = CheckPasswordDto,
    responses(
        (status = 200, description = "Session issued", body = SessionDto),
        (status = 400, description = "Password too short", body = ErrorDto),
        (status = 401, description = "Unknown account or wrong password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_password(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CheckPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let linked = LinkedAccountSession::new(&session);
    let linked_account_id = linked.account_id().await?;

    let (account, session_token) = AuthService::new(&state.db, &state.sessions)
        .check_password(
            &payload.account_id,
            &payload.password,
            linked_account_id.as_deref(),
        )
        .await?;

    if linked_account_id.as_deref() == Some(account.id.as_str()) {
        linked.clear().await?;
    }

    Ok(Json(ApiSuccess::new(SessionDto {
        account_id: account.id,
        session_token,
    })))
}

/// Start the Discord OAuth flow.
///
/// Stores a CSRF state in the cookie session and redirects to Discord.
#[utoipa::path(
    get,
    path = "/auth/discord/login",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Redirect to Discord"),
        (status = 404, description = "Discord login is not configured", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn discord_login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let discord = discord_login_config(&state)?;
    let service = DiscordAuthService::new(
        &state.db,
        &state.http_client,
        &discord.oauth_client,
        &discord.api_url,
    );

    let (url, csrf_token) = service.login_url();

    CsrfSession::new(&session)
        .set_token(csrf_token.secret().clone())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

/// Complete the Discord OAuth flow.
///
/// Validates the CSRF state, links the Discord identity to an account (creating it
/// on first login) and reports whether the account already has a password. The
/// account is remembered in the cookie session for the follow-up check-password call.
#[utoipa::path(
    get,
    path = "/auth/discord/callback",
    tag = AUTH_TAG,
    params(
        ("code" = String, Query, description = "Authorization code"),
        ("state" = String, Query, description = "CSRF state")
    ),
    responses(
        (status = 200, description = "Discord identity linked", body = DiscordLoginDto),
        (status = 400, description = "CSRF mismatch or code exchange failed", body = ErrorDto),
        (status = 404, description = "Discord login is not configured", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn discord_callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    let discord = discord_login_config(&state)?;

    validate_csrf(&session, &params.state).await?;

    let (account, _created) = DiscordAuthService::new(
        &state.db,
        &state.http_client,
        &discord.oauth_client,
        &discord.api_url,
    )
    .callback(params.code)
    .await?;

    LinkedAccountSession::new(&session)
        .set_account_id(&account.id)
        .await?;

    let password_set = account.has_password();
    Ok(Json(ApiSuccess::new(DiscordLoginDto {
        account_id: account.id,
        username: account.username,
        password_set,
    })))
}

fn discord_login_config(state: &AppState) -> Result<&DiscordLogin, AppError> {
    state
        .discord
        .as_ref()
        .ok_or_else(|| AuthError::DiscordLoginDisabled.into())
}

async fn validate_csrf(session: &Session, csrf_state: &str) -> Result<(), AppError> {
    let stored_state = CsrfSession::new(session).take_token().await?;

    match stored_state {
        Some(state) if state == csrf_state => Ok(()),
        _ => Err(AuthError::CsrfValidationFailed.into()),
    }
}
