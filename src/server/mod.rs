//! Backend for the Nexus Management dashboard.
//!
//! Serves account and server management for ER:LC (Emergency Response: Liberty County)
//! private servers and proxies the ER:LC API on behalf of server owners and members.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP handlers and DTO conversion
//! - **Service Layer** (`service/`) - Authentication, the per-server access gate, server
//!   management and the upstream client
//! - **Data Layer** (`data/`) - SeaORM repositories over accounts, servers, access rows
//!   and sessions
//! - **Model Layer** (`model/`) - Domain models and parameter types
//! - **Error Layer** (`error/`) - Error types and the JSON failure envelope
//! - **Extractors** (`extract`) - `Json`, `Query` and `Path` that reject with the envelope
//! - **Middleware** (`middleware/`) - Session token authentication and OAuth CSRF state
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based configuration
//! - **State** (`state`) - Shared application state
//! - **Startup** (`startup`) - Database, cookie sessions, HTTP and OAuth clients
//! - **Router** (`router`) - Routes, middleware layers and OpenAPI documentation
//! - **Scheduler** (`scheduler/`) - Periodic reconciliation of access rows
//!
//! # Request Flow
//!
//! 1. **Router** routes the request to a controller
//! 2. **Controller** resolves the caller through `AuthGuard`
//! 3. **Service** checks the caller's access level on the server and does the work
//! 4. **Data** reads and writes the database
//! 5. **Controller** wraps the result in the `{ "success": true, ... }` envelope

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
