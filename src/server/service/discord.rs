//! Discord OAuth2 login.
//!
//! Discord is a linked identity provider: the first login creates a password-less
//! account, later logins refresh its username. The caller then sets or checks the
//! account password through `AuthService::check_password` to obtain a session.

use oauth2::{
    basic::BasicTokenType, AuthorizationCode, CsrfToken, EmptyExtraTokenFields, Scope,
    StandardTokenResponse, TokenResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use url::Url;

use crate::server::{
    data::account::AccountRepository,
    error::{auth::AuthError, AppError},
    model::account::{Account, UpsertDiscordAccountParam},
    state::OAuth2Client,
    util::{id::generate_account_id, validate::validate_username},
};

/// Subset of the Discord user object returned by `GET /users/@me`.
#[derive(Debug, Deserialize)]
pub struct DiscordProfile {
    pub id: String,
    pub username: String,
}

pub struct DiscordAuthService<'a> {
    db: &'a DatabaseConnection,
    http_client: &'a reqwest::Client,
    oauth_client: &'a OAuth2Client,
    api_url: &'a str,
}

impl<'a> DiscordAuthService<'a> {
    /// Creates a new DiscordAuthService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `http_client` - HTTP client for the token exchange and Discord API requests
    /// - `oauth_client` - Configured Discord OAuth2 client
    /// - `api_url` - Discord API base URL
    ///
    /// # Returns
    /// - `DiscordAuthService` - New service instance
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
        api_url: &'a str,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            api_url,
        }
    }

    /// Generates the Discord authorization URL with a fresh CSRF state.
    ///
    /// Only the `identify` scope is requested.
    ///
    /// # Returns
    /// - `(Url, CsrfToken)` - Authorization URL and the state to store for the callback
    pub fn login_url(&self) -> (Url, CsrfToken) {
        self.oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("identify".to_string()))
            .url()
    }

    /// Completes the OAuth2 flow and creates or refreshes the linked account.
    ///
    /// # Arguments
    /// - `authorization_code` - Code from the callback query
    ///
    /// # Returns
    /// - `Ok((Account, bool))` - The linked account and whether it was just created
    /// - `Err(AppError::AuthErr(OAuthExchange))` - Token exchange or profile fetch failed
    /// - `Err(AppError::DbErr)` - Database error during upsert
    pub async fn callback(&self, authorization_code: String) -> Result<(Account, bool), AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::OAuthExchange(e.to_string()))?;

        let profile = self.fetch_profile(&token).await?;
        let username = self.username_for(&profile).await?;

        let (account, created) = AccountRepository::new(self.db)
            .upsert_discord(UpsertDiscordAccountParam {
                new_account_id: generate_account_id(),
                discord_id: profile.id,
                username,
            })
            .await?;

        if created {
            tracing::info!("Created account {} from Discord login", account.id);
        }

        Ok((account, created))
    }

    /// Retrieves the Discord profile of the token's owner.
    async fn fetch_profile(
        &self,
        token: &StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    ) -> Result<DiscordProfile, AppError> {
        let response = self
            .http_client
            .get(format!("{}/users/@me", self.api_url))
            .bearer_auth(token.access_token().secret())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| AuthError::OAuthExchange(e.to_string()))?;

        response
            .json::<DiscordProfile>()
            .await
            .map_err(|e| AuthError::OAuthExchange(e.to_string()).into())
    }

    /// Picks the local username for a Discord profile.
    ///
    /// The Discord username is used when it is a valid local username and is free or
    /// already belongs to this Discord account; otherwise `discord-<id>` is used.
    async fn username_for(&self, profile: &DiscordProfile) -> Result<String, AppError> {
        let fallback = format!("discord-{}", profile.id);

        if validate_username(&profile.username).is_err() {
            return Ok(fallback);
        }

        match AccountRepository::new(self.db)
            .find_by_username(&profile.username)
            .await?
        {
            Some(existing) if existing.discord_id.as_deref() != Some(profile.id.as_str()) => {
                Ok(fallback)
            }
            _ => Ok(profile.username.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
    use test_utils::{builder::TestBuilder, factory};

    use super::*;

    fn oauth_client() -> OAuth2Client {
        BasicClient::new(ClientId::new("client".to_string()))
            .set_client_secret(ClientSecret::new("secret".to_string()))
            .set_auth_uri(AuthUrl::new("https://discord.com/oauth2/authorize".to_string()).unwrap())
            .set_token_uri(TokenUrl::new("https://discord.com/api/oauth2/token".to_string()).unwrap())
            .set_redirect_uri(
                RedirectUrl::new("http://localhost:3000/auth/discord/callback".to_string())
                    .unwrap(),
            )
    }

    /// Tests the generated authorization URL.
    ///
    /// Expected: identify scope and the CSRF state in the query
    #[tokio::test]
    async fn login_url_carries_scope_and_state() {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let http = reqwest::Client::new();
        let oauth = oauth_client();

        let (url, state) =
            DiscordAuthService::new(db, &http, &oauth, "https://discord.com/api").login_url();

        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(query.contains(&("scope".to_string(), "identify".to_string())));
        assert!(query.contains(&("state".to_string(), state.secret().clone())));
    }

    /// Tests username selection when the Discord name is taken by a local account.
    ///
    /// Expected: `discord-<id>` fallback
    #[tokio::test]
    async fn falls_back_when_username_taken() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let http = reqwest::Client::new();
        let oauth = oauth_client();
        factory::account::AccountFactory::new(db)
            .username("alice")
            .build()
            .await?;

        let service = DiscordAuthService::new(db, &http, &oauth, "https://discord.com/api");
        let taken = DiscordProfile {
            id: "42".to_string(),
            username: "alice".to_string(),
        };
        let free = DiscordProfile {
            id: "43".to_string(),
            username: "carol".to_string(),
        };
        let invalid = DiscordProfile {
            id: "44".to_string(),
            username: "x".to_string(),
        };

        assert_eq!(service.username_for(&taken).await?, "discord-42");
        assert_eq!(service.username_for(&free).await?, "carol");
        assert_eq!(service.username_for(&invalid).await?, "discord-44");

        Ok(())
    }
}
