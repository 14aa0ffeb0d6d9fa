//! Server factory for creating test server entities.
//!
//! The factory only inserts the server row. Use `server_access::add_owner` (or
//! `helpers::create_server_with_owner`) to also record the ownership relation.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test servers with customizable fields.
pub struct ServerFactory<'a> {
    db: &'a DatabaseConnection,
    id: String,
    name: String,
    owner_account_id: String,
    erlc_server_id: Option<String>,
    api_key_encrypted: Option<String>,
    plan: String,
}

impl<'a> ServerFactory<'a> {
    /// Creates a new ServerFactory with default values.
    ///
    /// Defaults:
    /// - id: `"SRV-test-{n}"`
    /// - name: `"Server {n}"`
    /// - no external server id and no API key
    /// - plan: `"free"`
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `owner_account_id` - Account recorded as the server owner
    pub fn new(db: &'a DatabaseConnection, owner_account_id: &str) -> Self {
        let id = next_id();
        Self {
            db,
            id: format!("SRV-test-{}", id),
            name: format!("Server {}", id),
            owner_account_id: owner_account_id.to_string(),
            erlc_server_id: None,
            api_key_encrypted: None,
            plan: "free".to_string(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn erlc_server_id(mut self, erlc_server_id: impl Into<String>) -> Self {
        self.erlc_server_id = Some(erlc_server_id.into());
        self
    }

    /// Sets the stored (already encrypted) API key column.
    pub fn api_key_encrypted(mut self, ciphertext: impl Into<String>) -> Self {
        self.api_key_encrypted = Some(ciphertext.into());
        self
    }

    /// Builds and inserts the server entity into the database.
    pub async fn build(self) -> Result<entity::server::Model, DbErr> {
        let now = Utc::now();
        entity::server::ActiveModel {
            id: ActiveValue::Set(self.id),
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(None),
            owner_account_id: ActiveValue::Set(self.owner_account_id),
            erlc_server_id: ActiveValue::Set(self.erlc_server_id),
            api_key_encrypted: ActiveValue::Set(self.api_key_encrypted),
            plan: ActiveValue::Set(self.plan),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a server owned by `owner_account_id` with default values.
pub async fn create_server(
    db: &DatabaseConnection,
    owner_account_id: &str,
) -> Result<entity::server::Model, DbErr> {
    ServerFactory::new(db, owner_account_id).build().await
}
