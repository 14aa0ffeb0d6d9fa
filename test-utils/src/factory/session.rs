//! Session factory for creating persisted session rows.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Inserts a session row mapping `token_hash` to `account_id`.
///
/// The caller supplies the already hashed token, mirroring what the session
/// store persists.
///
/// # Arguments
/// - `db` - Database connection
/// - `account_id` - Account the session belongs to
/// - `token_hash` - Hex encoded SHA-256 of the bearer token
///
/// # Returns
/// - `Ok(entity::session::Model)` - Created session entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_session(
    db: &DatabaseConnection,
    account_id: &str,
    token_hash: &str,
) -> Result<entity::session::Model, DbErr> {
    entity::session::ActiveModel {
        token_hash: ActiveValue::Set(token_hash.to_string()),
        account_id: ActiveValue::Set(account_id.to_string()),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
