//! Session repository.
//!
//! Rows are keyed by the SHA-256 hash of the session token; plaintext tokens are never
//! written to the database.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
};

use crate::server::data::inserted;

pub struct SessionRepository<'a, C: ConnectionTrait = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SessionRepository<'a, C> {
    /// Creates a new SessionRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `SessionRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a session unless the token hash is already taken.
    ///
    /// An existing session is never overwritten.
    ///
    /// # Returns
    /// - `Ok(true)` - Session stored
    /// - `Ok(false)` - The token hash collided with an existing session
    /// - `Err(DbErr)` - Database error during insert
    pub async fn insert(&self, token_hash: &str, account_id: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::Session::insert(entity::session::ActiveModel {
            token_hash: ActiveValue::Set(token_hash.to_string()),
            account_id: ActiveValue::Set(account_id.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::session::Column::TokenHash)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(self.db)
        .await;

        inserted(result)
    }

    /// Looks up the account a session belongs to.
    ///
    /// # Returns
    /// - `Ok(Some(account_id))` - Session exists
    /// - `Ok(None)` - Unknown token hash
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_account_id(&self, token_hash: &str) -> Result<Option<String>, DbErr> {
        let session = entity::prelude::Session::find_by_id(token_hash.to_string())
            .one(self.db)
            .await?;

        Ok(session.map(|session| session.account_id))
    }

    /// Deletes a session; deleting an unknown session is not an error.
    ///
    /// # Returns
    /// - `Ok(true)` - Session deleted
    /// - `Ok(false)` - No session with that hash existed
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, token_hash: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::Session::delete_by_id(token_hash.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
