//! Server data repository for database operations.
//!
//! Provides the `ServerRepository` for server rows. Access relations live in the
//! `server_access` table and are handled by `ServerAccessRepository`.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::model::server::{CreateServerParam, Server, UpdateServerSettingsParam};

/// Repository providing database operations for server management.
pub struct ServerRepository<'a, C: ConnectionTrait = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ServerRepository<'a, C> {
    /// Creates a new ServerRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or an open transaction
    ///
    /// # Returns
    /// - `ServerRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new server.
    ///
    /// Only the server row is written; the owner's access row is added separately by
    /// the caller within the same transaction.
    ///
    /// # Arguments
    /// - `param` - Server ID, descriptive fields, owner, plan and optional encrypted API key
    ///
    /// # Returns
    /// - `Ok(Server)` - The created server
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, param: CreateServerParam) -> Result<Server, DbErr> {
        let now = Utc::now();

        let entity = entity::server::ActiveModel {
            id: ActiveValue::Set(param.id),
            name: ActiveValue::Set(param.name),
            description: ActiveValue::Set(param.description),
            owner_account_id: ActiveValue::Set(param.owner_account_id),
            erlc_server_id: ActiveValue::Set(param.erlc_server_id),
            api_key_encrypted: ActiveValue::Set(param.api_key_encrypted),
            plan: ActiveValue::Set(param.plan.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(Server::from_entity(entity))
    }

    /// Finds a server by ID.
    ///
    /// # Returns
    /// - `Ok(Some(Server))` - Server found
    /// - `Ok(None)` - No server with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, server_id: &str) -> Result<Option<Server>, DbErr> {
        let entity = entity::prelude::Server::find_by_id(server_id.to_string())
            .one(self.db)
            .await?;

        Ok(entity.map(Server::from_entity))
    }

    /// Finds all servers whose ID is in `server_ids`, oldest first.
    ///
    /// IDs without a matching server are skipped.
    pub async fn find_by_ids(&self, server_ids: &[String]) -> Result<Vec<Server>, DbErr> {
        if server_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Server::find()
            .filter(entity::server::Column::Id.is_in(server_ids.iter().cloned()))
            .order_by_asc(entity::server::Column::CreatedAt)
            .order_by_asc(entity::server::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Server::from_entity).collect())
    }

    /// Applies a settings update to a server.
    ///
    /// Fields set to `None` in `param` are left unchanged; `updated_at` is always
    /// refreshed.
    ///
    /// # Returns
    /// - `Ok(Some(Server))` - The updated server
    /// - `Ok(None)` - No server with that ID
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_settings(
        &self,
        server_id: &str,
        param: UpdateServerSettingsParam,
    ) -> Result<Option<Server>, DbErr> {
        let Some(server) = entity::prelude::Server::find_by_id(server_id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::server::ActiveModel = server.into();
        if let Some(name) = param.name {
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(description) = param.description {
            active_model.description = ActiveValue::Set(description);
        }
        if let Some(erlc_server_id) = param.erlc_server_id {
            active_model.erlc_server_id = ActiveValue::Set(erlc_server_id);
        }
        if let Some(api_key_encrypted) = param.api_key_encrypted {
            active_model.api_key_encrypted = ActiveValue::Set(Some(api_key_encrypted));
        }
        if let Some(plan) = param.plan {
            active_model.plan = ActiveValue::Set(plan.as_str().to_string());
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let updated = active_model.update(self.db).await?;

        Ok(Some(Server::from_entity(updated)))
    }

    /// Deletes a server row.
    ///
    /// # Returns
    /// - `Ok(true)` - Server deleted
    /// - `Ok(false)` - No server with that ID
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, server_id: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::Server::delete_by_id(server_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
