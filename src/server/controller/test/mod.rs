use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::SqliteStore;
use test_utils::builder::TestBuilder;

use crate::server::{
    config::AuthMode,
    router,
    service::{session::SessionManager, upstream::UpstreamClient},
    state::{AppState, DiscordLogin},
    util::crypto::ApiKeyCipher,
};


/// Application under test with its own in-memory database.
struct TestApp {
    router: Router,
    state: AppState,
    /// Keeps the in-memory database alive for the lifetime of the app.
    _test: test_utils::context::TestContext,
}

impl TestApp {
    async fn new() -> Self {
        Self::with_options("http://127.0.0.1:1", AuthMode::Session).await
    }

    async fn with_options(upstream_url: &str, auth_mode: AuthMode) -> Self {
        Self::build(upstream_url, auth_mode, None).await
    }

    /// App with Discord login whose token endpoint and API both live at `discord_url`.
    async fn with_discord(discord_url: &str) -> Self {
        let oauth_client = BasicClient::new(ClientId::new("client".to_string()))
            .set_client_secret(ClientSecret::new("secret".to_string()))
            .set_auth_uri(AuthUrl::new(format!("{}/oauth2/authorize", discord_url)).unwrap())
            .set_token_uri(TokenUrl::new(format!("{}/oauth2/token", discord_url)).unwrap())
            .set_redirect_uri(
                RedirectUrl::new("http://localhost:3000/auth/discord/callback".to_string())
                    .unwrap(),
            );

        Self::build(
            "http://127.0.0.1:1",
            AuthMode::Session,
            Some(DiscordLogin {
                oauth_client,
                api_url: discord_url.to_string(),
            }),
        )
        .await
    }

    async fn build(upstream_url: &str, auth_mode: AuthMode, discord: Option<DiscordLogin>) -> Self {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.clone().unwrap();

        let session_store = SqliteStore::new(db.get_sqlite_connection_pool().clone());
        session_store.migrate().await.unwrap();

        let state = AppState::new(
            db.clone(),
            reqwest::Client::new(),
            discord,
            SessionManager::database(db),
            ApiKeyCipher::new("test-encryption-key"),
            UpstreamClient::new(
                reqwest::Client::new(),
                upstream_url,
                Duration::from_secs(2),
            ),
            auth_mode,
        );

        let router = router::app(
            state.clone(),
            SessionManagerLayer::new(session_store).with_secure(false),
            None,
        )
        .unwrap();

        Self {
            router,
            state,
            _test: test,
        }
    }

    /// Sends a request and returns the status and the JSON body (`Null` if empty).
    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, _, body) = self.send_with_cookie(method, uri, token, None, body).await;

        (status, body)
    }

    /// Like `send`, with an optional `Cookie` header; also returns the response headers.
    async fn send_with_cookie(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, token);
        }
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, headers, body)
    }

    /// Signs up and logs in, returning `(account_id, session_token)`.
    async fn signup_and_login(&self, username: &str, password: &str) -> (String, String) {
        let credentials = json!({ "username": username, "password": password });

        let (status, _) = self
            .send(Method::POST, "/auth/signup", None, Some(credentials.clone()))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .send(Method::POST, "/auth/login", None, Some(credentials))
            .await;
        assert_eq!(status, StatusCode::OK);

        (
            body["accountId"].as_str().unwrap().to_string(),
            body["sessionToken"].as_str().unwrap().to_string(),
        )
    }

    /// Creates a server as `token`'s account and returns its ID.
    async fn create_server(&self, token: &str, body: Value) -> String {
        let (status, body) = self
            .send(Method::POST, "/api/servers/create", Some(token), Some(body))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        body["serverId"].as_str().unwrap().to_string()
    }
}
