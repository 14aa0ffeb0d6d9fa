//! Server access repository.
//!
//! Each (account, server) pair has at most one row carrying the role `owner` or
//! `member`. Adding uses `INSERT … ON CONFLICT DO NOTHING` and removing a single
//! `DELETE`, so concurrent membership changes never lose updates.

use chrono::Utc;
use entity::server_access::AccessRole;
use migration::OnConflict;
use sea_orm::{
    sea_query::Query, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::inserted,
    model::{access::AccessLevel, server::Member},
};

/// Repository for the account ↔ server relation.
pub struct ServerAccessRepository<'a, C: ConnectionTrait = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ServerAccessRepository<'a, C> {
    /// Creates a new ServerAccessRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or an open transaction
    ///
    /// # Returns
    /// - `ServerAccessRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Adds an access row if the pair has none.
    ///
    /// An existing row is left untouched, whatever its role.
    ///
    /// # Arguments
    /// - `account_id` - Account to grant access
    /// - `server_id` - Server to grant access to
    /// - `role` - Role of the new row
    ///
    /// # Returns
    /// - `Ok(true)` - Row inserted
    /// - `Ok(false)` - The pair already had a row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn add(
        &self,
        account_id: &str,
        server_id: &str,
        role: AccessRole,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::ServerAccess::insert(entity::server_access::ActiveModel {
            account_id: ActiveValue::Set(account_id.to_string()),
            server_id: ActiveValue::Set(server_id.to_string()),
            role: ActiveValue::Set(role),
            created_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([
                entity::server_access::Column::AccountId,
                entity::server_access::Column::ServerId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(self.db)
        .await;

        inserted(result)
    }

    /// Removes the pair's access row if it has the given role.
    ///
    /// # Returns
    /// - `Ok(true)` - Row deleted
    /// - `Ok(false)` - No row with that role existed
    /// - `Err(DbErr)` - Database error during delete
    pub async fn remove(
        &self,
        account_id: &str,
        server_id: &str,
        role: AccessRole,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::ServerAccess::delete_many()
            .filter(entity::server_access::Column::AccountId.eq(account_id))
            .filter(entity::server_access::Column::ServerId.eq(server_id))
            .filter(entity::server_access::Column::Role.eq(role))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Determines an account's access level on a server.
    ///
    /// # Returns
    /// - `Ok(AccessLevel::Owner)` - Pair has an owner row
    /// - `Ok(AccessLevel::Member)` - Pair has a member row
    /// - `Ok(AccessLevel::NoAccess)` - Pair has no row
    /// - `Err(DbErr)` - Database error during query
    pub async fn access_level(
        &self,
        account_id: &str,
        server_id: &str,
    ) -> Result<AccessLevel, DbErr> {
        let row = entity::prelude::ServerAccess::find_by_id((
            account_id.to_string(),
            server_id.to_string(),
        ))
        .one(self.db)
        .await?;

        Ok(AccessLevel::from_role(row.map(|row| row.role)))
    }

    /// Lists the IDs of servers on which the account has the given role, oldest grant first.
    pub async fn server_ids_for_account(
        &self,
        account_id: &str,
        role: AccessRole,
    ) -> Result<Vec<String>, DbErr> {
        let rows = entity::prelude::ServerAccess::find()
            .filter(entity::server_access::Column::AccountId.eq(account_id))
            .filter(entity::server_access::Column::Role.eq(role))
            .order_by_asc(entity::server_access::Column::CreatedAt)
            .order_by_asc(entity::server_access::Column::ServerId)
            .all(self.db)
            .await?;

        Ok(rows.into_iter().map(|row| row.server_id).collect())
    }

    /// Lists every account with access to a server, owner first.
    ///
    /// Rows whose account no longer exists are skipped.
    pub async fn accounts_for_server(&self, server_id: &str) -> Result<Vec<Member>, DbErr> {
        let rows = entity::prelude::ServerAccess::find()
            .filter(entity::server_access::Column::ServerId.eq(server_id))
            .order_by_asc(entity::server_access::Column::CreatedAt)
            .find_also_related(entity::prelude::Account)
            .all(self.db)
            .await?;

        let mut members: Vec<Member> = rows
            .into_iter()
            .filter_map(|(access, account)| {
                account.map(|account| Member {
                    account_id: access.account_id,
                    username: account.username,
                    level: AccessLevel::from_role(Some(access.role)),
                })
            })
            .collect();
        members.sort_by(|a, b| b.level.cmp(&a.level));

        Ok(members)
    }

    /// Deletes every access row of a server.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows deleted
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_for_server(&self, server_id: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::ServerAccess::delete_many()
            .filter(entity::server_access::Column::ServerId.eq(server_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes access rows that reference a server which no longer exists.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of orphaned rows deleted
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_orphans(&self) -> Result<u64, DbErr> {
        let existing_servers = Query::select()
            .column(entity::server::Column::Id)
            .from(entity::prelude::Server)
            .to_owned();

        let result = entity::prelude::ServerAccess::delete_many()
            .filter(entity::server_access::Column::ServerId.not_in_subquery(existing_servers))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
