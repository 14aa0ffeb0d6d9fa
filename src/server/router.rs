use axum::{
    http::HeaderValue,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tower_sessions::{SessionManagerLayer, SessionStore};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{
        account::{
            AccountDto, CheckPasswordDto, CredentialsDto, DiscordLoginDto, SessionDto,
            SignupResponseDto,
        },
        api::{ErrorDto, HealthDto, UpstreamStatusDto},
        server::{
            AccountRefDto, AddMemberDto, CreateServerDto, CreateServerResponseDto, MemberChangeDto,
            MemberDto, MemberListDto, ServerDto, ServerListDto, ServerSettingsDto,
            UpdateServerSettingsDto,
        },
        upstream::{
            CommandDto, CommandResultDto, LiveDataDto, TestConnectionDto, TestConnectionResultDto,
        },
    },
    server::{
        controller::{
            auth::{
                self, check_password, discord_callback, discord_login, login, logout, signup,
                AUTH_TAG,
            },
            health::{self, HEALTH_TAG},
            server::{
                self, add_member, create_server, delete_server, get_settings, list_members,
                list_servers_for_account, remove_member, update_settings, SERVER_TAG,
            },
            upstream::{self, execute_command, live_read, test_connection, UPSTREAM_TAG},
            user::{self, get_user, get_user_by_id, USER_TAG},
        },
        error::{config::ConfigError, AppError},
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Nexus Management API"),
    paths(
        auth::signup,
        auth::login,
        auth::logout,
        auth::check_password,
        auth::discord_login,
        auth::discord_callback,
        user::get_user,
        user::get_user_by_id,
        server::create_server,
        server::list_servers_for_account,
        server::get_settings,
        server::update_settings,
        server::delete_server,
        server::list_members,
        server::add_member,
        server::remove_member,
        upstream::live_read,
        upstream::execute_command,
        upstream::test_connection,
        health::health,
    ),
    components(schemas(
        ErrorDto,
        UpstreamStatusDto,
        HealthDto,
        CredentialsDto,
        CheckPasswordDto,
        SignupResponseDto,
        SessionDto,
        DiscordLoginDto,
        AccountDto,
        CreateServerDto,
        CreateServerResponseDto,
        UpdateServerSettingsDto,
        AccountRefDto,
        AddMemberDto,
        MemberDto,
        MemberListDto,
        MemberChangeDto,
        ServerDto,
        ServerSettingsDto,
        ServerListDto,
        CommandDto,
        CommandResultDto,
        TestConnectionDto,
        TestConnectionResultDto,
        LiveDataDto,
    )),
    tags(
        (name = AUTH_TAG, description = "Signup, login and Discord OAuth"),
        (name = USER_TAG, description = "Account profiles"),
        (name = SERVER_TAG, description = "Server settings and membership"),
        (name = UPSTREAM_TAG, description = "ER:LC API proxy, also served under /api/erlc"),
        (name = HEALTH_TAG, description = "Liveness"),
    )
)]
pub struct ApiDoc;

/// ER:LC proxy routes, mounted under both `/api/upstream` and `/api/erlc`.
fn upstream_routes() -> Router<AppState> {
    Router::new()
        .route("/test-connection", post(test_connection))
        .route("/command/{server_id}", post(execute_command))
        .route("/{operation}/{server_id}", get(live_read))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", get(logout))
        .route("/auth/check-password", post(check_password))
        .route("/auth/discord/login", get(discord_login))
        .route("/auth/discord/callback", get(discord_callback))
        .route("/api/health", get(health::health))
        .route("/api/user", get(get_user))
        .route("/api/user/{account_id}", get(get_user_by_id))
        .route("/api/servers/create", post(create_server))
        .route(
            "/api/servers/user/{account_id}",
            get(list_servers_for_account),
        )
        .route(
            "/api/servers/{server_id}/settings",
            get(get_settings).put(update_settings),
        )
        .route("/api/servers/{server_id}/delete", delete(delete_server))
        .route(
            "/api/servers/{server_id}/members",
            get(list_members).post(add_member),
        )
        .route(
            "/api/servers/{server_id}/members/{member_id}",
            delete(remove_member),
        )
        .nest("/api/upstream", upstream_routes())
        .nest("/api/erlc", upstream_routes())
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
}

/// Builds the complete application with state and middleware layers.
///
/// # Arguments
/// - `state` - Application state
/// - `session_layer` - Cookie session layer for the OAuth CSRF state
/// - `cors_allowed_origin` - Single allowed origin; any origin when `None`
///
/// # Returns
/// - `Ok(Router)` - Application ready to serve
/// - `Err(AppError::ConfigErr(InvalidValue))` - The CORS origin is not a valid header value
pub fn app<Store>(
    state: AppState,
    session_layer: SessionManagerLayer<Store>,
    cors_allowed_origin: Option<&str>,
) -> Result<Router, AppError>
where
    Store: SessionStore + Clone,
{
    let allow_origin = match cors_allowed_origin {
        Some(origin) => AllowOrigin::exact(HeaderValue::from_str(origin).map_err(|e| {
            ConfigError::InvalidValue {
                name: "CORS_ALLOWED_ORIGIN".to_string(),
                reason: e.to_string(),
            }
        })?),
        None => AllowOrigin::from(Any),
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(router()
        .with_state(state)
        .layer(session_layer)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}
