//! HTTP request handlers.
//!
//! Handlers authenticate the caller with `AuthGuard`, call into the service layer and
//! wrap the result in the `ApiSuccess` envelope. Failures are returned as `AppError`
//! and rendered by its `IntoResponse` implementation.

pub mod auth;
pub mod health;
pub mod server;
pub mod upstream;
pub mod user;

#[cfg(test)]
mod test;
