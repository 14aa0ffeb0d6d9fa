//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing core business rules and validation
//! - **Orchestration**: Coordinating multiple repository calls and the upstream API
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Server creation and deletion run in one transaction each

pub mod access;
pub mod account;
pub mod auth;
pub mod discord;
pub mod reconcile;
pub mod server;
pub mod session;
pub mod upstream;
