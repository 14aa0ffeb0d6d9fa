//! Account data repository for database operations.
//!
//! This module provides the `AccountRepository` for managing account records. It handles
//! account creation, lookups by id, username and Discord id, and password updates with
//! conversion between entity models and domain models at the infrastructure boundary.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};

use crate::server::model::account::{Account, CreateAccountParam, UpsertDiscordAccountParam};

/// Repository providing database operations for account management.
pub struct AccountRepository<'a, C: ConnectionTrait = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AccountRepository<'a, C> {
    /// Creates a new AccountRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or an open transaction
    ///
    /// # Returns
    /// - `AccountRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new account.
    ///
    /// # Arguments
    /// - `param` - Account id, username and optional credential / Discord link
    ///
    /// # Returns
    /// - `Ok(Account)` - The created account
    /// - `Err(DbErr)` - Database error, including a unique violation when the username
    ///   or Discord id is already in use
    pub async fn create(&self, param: CreateAccountParam) -> Result<Account, DbErr> {
        let now = Utc::now();

        let entity = entity::account::ActiveModel {
            id: ActiveValue::Set(param.id),
            username: ActiveValue::Set(param.username),
            password_hash: ActiveValue::Set(param.password_hash),
            discord_id: ActiveValue::Set(param.discord_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(Account::from_entity(entity))
    }

    /// Finds an account by its account ID.
    ///
    /// # Returns
    /// - `Ok(Some(Account))` - Account found
    /// - `Ok(None)` - No account with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, account_id: &str) -> Result<Option<Account>, DbErr> {
        let entity = entity::prelude::Account::find_by_id(account_id.to_string())
            .one(self.db)
            .await?;

        Ok(entity.map(Account::from_entity))
    }

    /// Finds an account by its exact username.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DbErr> {
        let entity = entity::prelude::Account::find()
            .filter(entity::account::Column::Username.eq(username))
            .one(self.db)
            .await?;

        Ok(entity.map(Account::from_entity))
    }

    /// Creates or refreshes the account linked to a Discord user.
    ///
    /// If an account is linked to `param.discord_id`, its username is replaced with
    /// `param.username`; otherwise a new password-less account is created with
    /// `param.new_account_id`.
    ///
    /// # Arguments
    /// - `param` - Discord user ID, current Discord username and ID for a new account
    ///
    /// # Returns
    /// - `Ok((Account, true))` - A new account was created
    /// - `Ok((Account, false))` - The existing account was refreshed
    /// - `Err(DbErr)` - Database error, including a unique violation on the username
    pub async fn upsert_discord(
        &self,
        param: UpsertDiscordAccountParam,
    ) -> Result<(Account, bool), DbErr> {
        let existing = entity::prelude::Account::find()
            .filter(entity::account::Column::DiscordId.eq(param.discord_id.as_str()))
            .one(self.db)
            .await?;

        match existing {
            Some(account) => {
                if account.username == param.username {
                    return Ok((Account::from_entity(account), false));
                }

                let mut active_model: entity::account::ActiveModel = account.into();
                active_model.username = ActiveValue::Set(param.username);
                active_model.updated_at = ActiveValue::Set(Utc::now());

                let updated = active_model.update(self.db).await?;

                Ok((Account::from_entity(updated), false))
            }
            None => {
                let created = self
                    .create(CreateAccountParam {
                        id: param.new_account_id,
                        username: param.username,
                        password_hash: None,
                        discord_id: Some(param.discord_id),
                    })
                    .await?;

                Ok((created, true))
            }
        }
    }

    /// Stores a password hash for an account that has none yet.
    ///
    /// The update is a single conditional statement, so two concurrent first-time
    /// password settings cannot both succeed.
    ///
    /// # Returns
    /// - `Ok(true)` - Hash stored
    /// - `Ok(false)` - Account does not exist or already has a password
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_password_hash(
        &self,
        account_id: &str,
        password_hash: &str,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::Account::update_many()
            .col_expr(
                entity::account::Column::PasswordHash,
                Expr::value(password_hash.to_string()),
            )
            .col_expr(entity::account::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::account::Column::Id.eq(account_id))
            .filter(entity::account::Column::PasswordHash.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
