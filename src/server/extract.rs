//! Request extractors whose rejections render as the JSON failure envelope.
//!
//! Axum's own `Json`, `Query` and `Path` reject with plain-text bodies. These wrappers
//! run the same extraction and convert the rejection into `AppError::BadRequest`, so a
//! missing field or a malformed query string still yields
//! `{ "success": false, "code": "VALIDATION_ERROR", ... }`.

use axum::{
    extract::{FromRequest, FromRequestParts, OptionalFromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Serialize};

use crate::server::error::AppError;

/// JSON body extractor and response wrapper.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// An absent body (no JSON content type) yields `None`; a present but invalid one is
/// still a 400.
impl<T, S> OptionalFromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let body = <axum::Json<T> as OptionalFromRequest<S>>::from_request(req, state).await?;

        Ok(body.map(|axum::Json(value)| Json(value)))
    }
}

/// Query string extractor.
#[derive(Debug, Clone, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

/// Path parameter extractor.
#[derive(Debug, Clone, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);
