//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into the JSON failure envelope. The `AppError` enum is the
//! top-level error type that wraps domain-specific errors and implements
//! `IntoResponse`, so handlers simply return `Result<_, AppError>`.
//!
//! Every failure body has the shape
//! `{ "success": false, "error": <kind>, "code": <CODE>, "message": <text> }`.

pub mod access;
pub mod auth;
pub mod config;
pub mod internal;
pub mod upstream;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::{ErrorDto, UpstreamStatusDto},
    server::error::{
        access::AccessError, auth::AuthError, config::ConfigError, internal::InternalError,
        upstream::UpstreamError,
    },
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Domain-specific errors (`AuthError`,
/// `AccessError`, `UpstreamError`) handle their own response mapping, while
/// infrastructure failures all collapse into a generic `StoreError` / internal error.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication error (missing or invalid session, bad credentials).
    ///
    /// Delegates to `AuthError::into_response()`.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Per-server authorization error from the access gate.
    ///
    /// Delegates to `AccessError::into_response()`.
    #[error(transparent)]
    AccessErr(#[from] AccessError),

    /// Failure reported by or while reaching the upstream game-server API.
    ///
    /// Delegates to `UpstreamError::into_response()`.
    #[error(transparent)]
    UpstreamErr(#[from] UpstreamError),

    /// Unexpected internal failure (encryption, hashing, token generation).
    ///
    /// Results in 500 Internal Server Error with details logged server-side.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    ///
    /// Results in 500 with the `STORE_ERROR` code; details are only logged.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Cookie session store operation error.
    #[error(transparent)]
    SessionErr(#[from] tower_sessions::session::Error),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the `VALIDATION_ERROR` code.
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error with custom message.
    ///
    /// The provided message is logged but a generic message is returned to the client.
    #[error("{0}")]
    InternalError(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Builds a failure envelope response.
///
/// # Arguments
/// - `status` - HTTP status code of the response
/// - `error` - Error kind name (`Unauthorized`, `Forbidden`, ...)
/// - `code` - Stable machine-readable code
/// - `message` - Client-safe description
pub(crate) fn error_response(
    status: StatusCode,
    error: &str,
    code: &str,
    message: impl Into<String>,
) -> Response {
    error_response_with_upstream(status, error, code, message, None)
}

pub(crate) fn error_response_with_upstream(
    status: StatusCode,
    error: &str,
    code: &str,
    message: impl Into<String>,
    upstream_status: Option<UpstreamStatusDto>,
) -> Response {
    (
        status,
        Json(ErrorDto {
            success: false,
            error: error.to_string(),
            code: code.to_string(),
            message: message.into(),
            upstream_status,
        }),
    )
        .into_response()
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest`
/// - 404 Not Found - For `NotFound`
/// - 500 Internal Server Error - For store, session, scheduler and internal errors
/// - Variable - For `AuthErr`, `AccessErr` and `UpstreamErr`, delegated to the inner error
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::AccessErr(err) => err.into_response(),
            Self::UpstreamErr(err) => err.into_response(),
            Self::NotFound(msg) => error_response(StatusCode::NOT_FOUND, "NotFound", "NOT_FOUND", msg),
            Self::BadRequest(msg) => error_response(
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "VALIDATION_ERROR",
                msg,
            ),
            Self::DbErr(err) => StoreError(err).into_response(),
            Self::SessionErr(err) => StoreError(err).into_response(),
            Self::InternalError(msg) => InternalServerError(msg).into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type converting a persistence failure into a 500 `StoreError` response.
///
/// The underlying error is logged; the client only sees a generic message.
pub struct StoreError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for StoreError<E> {
    fn into_response(self) -> Response {
        tracing::error!("Store error: {}", self.0);

        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "StoreError",
            "STORE_ERROR",
            "Internal server error",
        )
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic message to the client to avoid leaking
/// implementation details. Used as a fallback for errors without specific mappings.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "InternalError",
            "INTERNAL_ERROR",
            "Internal server error",
        )
    }
}
