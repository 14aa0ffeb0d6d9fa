//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each request
//! handler through Axum's state extraction. It holds:
//! - Database connection pool for the credential store
//! - Session manager resolving API session tokens
//! - API key cipher for the upstream keys stored at rest
//! - Upstream client for the ER:LC API
//! - Optional Discord OAuth2 client and the HTTP client it uses

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;

use crate::server::{
    config::AuthMode,
    service::{session::SessionManager, upstream::UpstreamClient},
    util::crypto::ApiKeyCipher,
};

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Discord login dependencies, present only when Discord credentials are configured.
#[derive(Clone)]
pub struct DiscordLogin {
    pub oauth_client: OAuth2Client,
    /// Discord API base URL used to fetch the user's profile.
    pub api_url: String,
}

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone: the database handle is a pool, `reqwest::Client`
/// and `SessionManager` are reference counted, and the cipher is a 32-byte key.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,

    /// HTTP client for the Discord OAuth exchange and profile requests.
    ///
    /// Configured without redirects to prevent SSRF through OAuth endpoints.
    pub http_client: reqwest::Client,

    /// `None` when Discord login is disabled.
    pub discord: Option<DiscordLogin>,

    pub sessions: SessionManager,
    pub cipher: ApiKeyCipher,
    pub upstream: UpstreamClient,
    pub auth_mode: AuthMode,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `http_client` - HTTP client for Discord requests
    /// - `discord` - Discord login dependencies, if enabled
    /// - `sessions` - Session manager over the configured store
    /// - `cipher` - Cipher for stored API keys
    /// - `upstream` - ER:LC API client
    /// - `auth_mode` - How callers are identified
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        discord: Option<DiscordLogin>,
        sessions: SessionManager,
        cipher: ApiKeyCipher,
        upstream: UpstreamClient,
        auth_mode: AuthMode,
    ) -> Self {
        Self {
            db,
            http_client,
            discord,
            sessions,
            cipher,
            upstream,
            auth_mode,
        }
    }
}
