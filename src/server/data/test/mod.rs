mod account;
mod server;
mod server_access;
mod session;
