use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    config::AuthMode,
    error::{auth::AuthError, AppError},
    middleware::{
        auth::{session_token, AuthGuard},
        session::{CsrfSession, LinkedAccountSession},
    },
    service::session::SessionManager,
};

mod auth;

fn headers_with(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    headers
}
