pub use super::account::Entity as Account;
pub use super::server::Entity as Server;
pub use super::server_access::Entity as ServerAccess;
pub use super::session::Entity as Session;
