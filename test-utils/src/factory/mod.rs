//! Factory methods for creating test data.
//!
//! Factories insert entities with sensible defaults so tests only spell out the
//! fields they care about. Each entity has a `Factory` builder for customization
//! and a `create_*` shorthand for the default case.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let account = factory::account::create_account(&db).await?;
//! let (owner, server) = factory::helpers::create_server_with_owner(&db).await?;
//! factory::server_access::add_member(&db, &account.id, &server.id).await?;
//! factory::session::create_session(&db, &account.id, &token_hash).await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let server = factory::server::ServerFactory::new(&db, &owner.id)
//!     .name("Liberty County")
//!     .api_key_encrypted(ciphertext)
//!     .build()
//!     .await?;
//! ```

pub mod account;
pub mod helpers;
pub mod server;
pub mod server_access;
pub mod session;

pub use account::create_account;
pub use server::create_server;
pub use server_access::{add_member, add_owner};
pub use session::create_session;
