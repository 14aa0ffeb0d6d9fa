//! SeaORM entity definitions for the Nexus credential store.

pub mod prelude;

pub mod account;
pub mod server;
pub mod server_access;
pub mod session;
