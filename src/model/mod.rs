//! Data transfer objects exchanged with dashboard clients.
//!
//! Every type here is serialized to or deserialized from JSON at the HTTP boundary.
//! Field names are camelCase on the wire to match the existing dashboard scripts.

pub mod account;
pub mod api;
pub mod server;
pub mod upstream;
