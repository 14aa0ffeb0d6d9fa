use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use sea_orm::DatabaseConnection;
use time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::{Config, DiscordConfig, SessionBackend},
    error::{config::ConfigError, AppError},
    service::{session::SessionManager, upstream::UpstreamClient},
    state::{AppState, DiscordLogin, OAuth2Client},
    util::crypto::ApiKeyCipher,
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the cookie session layer holding the OAuth CSRF state.
///
/// Uses the tower-sessions SQLite store on the application's pool. Cookie sessions
/// expire after 10 minutes of inactivity, which bounds the time to finish a login.
///
/// # Returns
/// - `Ok(SessionManagerLayer)` - Layer to attach to the router
/// - `Err(AppError::InternalError)` - Session table migration failed
pub async fn connect_to_session(
    db: &DatabaseConnection,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store
        .migrate()
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to migrate session store: {}", e)))?;

    Ok(SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(10))))
}

/// Builds the HTTP client for Discord requests.
///
/// Redirects are disabled so OAuth endpoints cannot bounce requests elsewhere.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))
}

/// Configures the Discord OAuth2 client.
///
/// # Returns
/// - `Ok(OAuth2Client)` - Client with auth, token and redirect URLs set
/// - `Err(AppError::ConfigErr(InvalidValue))` - One of the URLs does not parse
pub fn setup_oauth_client(discord: &DiscordConfig) -> Result<OAuth2Client, AppError> {
    let invalid = |name: &str, e: url::ParseError| ConfigError::InvalidValue {
        name: name.to_string(),
        reason: e.to_string(),
    };

    Ok(BasicClient::new(ClientId::new(discord.client_id.clone()))
        .set_client_secret(ClientSecret::new(discord.client_secret.clone()))
        .set_auth_uri(
            AuthUrl::new(discord.auth_url.clone()).map_err(|e| invalid("DISCORD_AUTH_URL", e))?,
        )
        .set_token_uri(
            TokenUrl::new(discord.token_url.clone()).map_err(|e| invalid("DISCORD_TOKEN_URL", e))?,
        )
        .set_redirect_uri(
            RedirectUrl::new(discord.redirect_url.clone())
                .map_err(|e| invalid("DISCORD_REDIRECT_URL", e))?,
        ))
}

/// Creates the session manager over the configured backend.
pub fn setup_session_manager(config: &Config, db: &DatabaseConnection) -> SessionManager {
    match config.session_backend {
        SessionBackend::Database => SessionManager::database(db.clone()),
        SessionBackend::Memory => {
            tracing::info!("Using in-memory session store; sessions are lost on restart");
            SessionManager::memory()
        }
    }
}

/// Assembles the application state from configuration and the connected database.
///
/// # Returns
/// - `Ok(AppState)` - State ready to be handed to the router
/// - `Err(AppError)` - HTTP client or OAuth client setup failed
pub fn build_state(config: &Config, db: DatabaseConnection) -> Result<AppState, AppError> {
    let http_client = setup_reqwest_client()?;

    let discord = match &config.discord {
        Some(discord) => Some(DiscordLogin {
            oauth_client: setup_oauth_client(discord)?,
            api_url: discord.api_url.clone(),
        }),
        None => {
            tracing::info!("Discord login disabled: no Discord credentials configured");
            None
        }
    };

    let sessions = setup_session_manager(config, &db);
    let cipher = ApiKeyCipher::new(&config.api_key_encryption_key);
    let upstream = UpstreamClient::new(
        reqwest::Client::new(),
        config.erlc_api_url.clone(),
        config.upstream_timeout,
    );

    Ok(AppState::new(
        db,
        http_client,
        discord,
        sessions,
        cipher,
        upstream,
        config.auth_mode,
    ))
}
