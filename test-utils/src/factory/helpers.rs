//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates an account together with a server it owns.
///
/// Inserts the account, the server and the owner access row, all with default
/// values (the server has no API key configured).
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((account, server))` - Created owner account and server
/// - `Err(DbErr)` - Database error during creation
pub async fn create_server_with_owner(
    db: &DatabaseConnection,
) -> Result<(entity::account::Model, entity::server::Model), DbErr> {
    let owner = crate::factory::account::create_account(db).await?;
    let server = crate::factory::server::create_server(db, &owner.id).await?;
    crate::factory::server_access::add_owner(db, &owner.id, &server.id).await?;

    Ok((owner, server))
}
