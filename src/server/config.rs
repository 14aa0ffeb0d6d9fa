use std::time::Duration;

use crate::server::error::{config::ConfigError, AppError};

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const DISCORD_API_URL: &str = "https://discord.com/api";

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_ERLC_API_URL: &str = "https://api.policeroleplay.community/v1";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
/// Every 15 minutes, at second 0.
const DEFAULT_RECONCILE_CRON: &str = "0 */15 * * * *";

/// Where session tokens are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    /// Sessions survive restarts in the `session` table.
    Database,
    /// Sessions live in process memory and are lost on restart.
    Memory,
}

/// How the caller's identity is established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// A session token in the `Authorization` header is required.
    Session,
    /// The `accountId` parameter is trusted without a token. Tests and local development only.
    TrustAccountId,
}

/// Discord OAuth application credentials.
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,

    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
}

pub struct Config {
    pub database_url: String,
    pub bind_address: String,

    /// Secret the API key encryption key is derived from.
    pub api_key_encryption_key: String,

    pub erlc_api_url: String,
    pub upstream_timeout: Duration,

    pub session_backend: SessionBackend,
    pub auth_mode: AuthMode,

    /// `None` disables the Discord login endpoints.
    pub discord: Option<DiscordConfig>,

    pub reconcile_cron: String,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(AppError::ConfigErr(MissingEnvVar))` - A required variable is not set
    /// - `Err(AppError::ConfigErr(InvalidValue))` - A variable has an unusable value
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let require =
            |name: &str| get(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()));

        let upstream_timeout_secs = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    name: "UPSTREAM_TIMEOUT_SECS".to_string(),
                    reason: format!("expected a positive number of seconds, got {:?}", raw),
                })?,
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };

        let session_backend = match get("SESSION_BACKEND").as_deref() {
            None | Some("database") => SessionBackend::Database,
            Some("memory") => SessionBackend::Memory,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: "SESSION_BACKEND".to_string(),
                    reason: format!("expected `database` or `memory`, got {:?}", other),
                }
                .into())
            }
        };

        let auth_mode = match get("AUTH_MODE").as_deref() {
            None | Some("session") => AuthMode::Session,
            Some("trust-account-id") => AuthMode::TrustAccountId,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: "AUTH_MODE".to_string(),
                    reason: format!("expected `session` or `trust-account-id`, got {:?}", other),
                }
                .into())
            }
        };

        let discord = match (
            get("DISCORD_CLIENT_ID"),
            get("DISCORD_CLIENT_SECRET"),
            get("DISCORD_REDIRECT_URL"),
        ) {
            (Some(client_id), Some(client_secret), Some(redirect_url)) => Some(DiscordConfig {
                client_id,
                client_secret,
                redirect_url,
                auth_url: DISCORD_AUTH_URL.to_string(),
                token_url: DISCORD_TOKEN_URL.to_string(),
                api_url: DISCORD_API_URL.to_string(),
            }),
            (None, None, None) => None,
            _ => return Err(ConfigError::IncompleteDiscordConfig.into()),
        };

        Ok(Self {
            database_url: require("DATABASE_URL")?,
            bind_address: get("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            api_key_encryption_key: require("API_KEY_ENCRYPTION_KEY")?,
            erlc_api_url: get("ERLC_API_URL")
                .unwrap_or_else(|| DEFAULT_ERLC_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            upstream_timeout: Duration::from_secs(upstream_timeout_secs),
            session_backend,
            auth_mode,
            discord,
            reconcile_cron: get("RECONCILE_CRON")
                .unwrap_or_else(|| DEFAULT_RECONCILE_CRON.to_string()),
            cors_allowed_origin: get("CORS_ALLOWED_ORIGIN"),
        })
    }
}
