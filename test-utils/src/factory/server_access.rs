//! Factory for account ↔ server access rows.

use chrono::Utc;
use entity::server_access::AccessRole;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Inserts an access row with the given role.
pub async fn create_access(
    db: &DatabaseConnection,
    account_id: &str,
    server_id: &str,
    role: AccessRole,
) -> Result<entity::server_access::Model, DbErr> {
    entity::server_access::ActiveModel {
        account_id: ActiveValue::Set(account_id.to_string()),
        server_id: ActiveValue::Set(server_id.to_string()),
        role: ActiveValue::Set(role),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}

/// Records `account_id` as owner of `server_id`.
pub async fn add_owner(
    db: &DatabaseConnection,
    account_id: &str,
    server_id: &str,
) -> Result<entity::server_access::Model, DbErr> {
    create_access(db, account_id, server_id, AccessRole::Owner).await
}

/// Records `account_id` as member of `server_id`.
pub async fn add_member(
    db: &DatabaseConnection,
    account_id: &str,
    server_id: &str,
) -> Result<entity::server_access::Model, DbErr> {
    create_access(db, account_id, server_id, AccessRole::Member).await
}
