//! Database repository layer for the credential store.
//!
//! This module contains repository structs that handle database operations for accounts,
//! servers, server access rows and sessions. Repositories use SeaORM entity models
//! internally and return domain models to maintain separation between the data layer and
//! business logic layer.
//!
//! Every repository is generic over `ConnectionTrait`, so the same methods run against the
//! connection pool or inside a transaction opened by the service layer.

pub mod account;
pub mod server;
pub mod server_access;
pub mod session;

#[cfg(test)]
mod test;

use sea_orm::DbErr;

/// Whether an insert was skipped because of an `ON CONFLICT DO NOTHING` clause.
///
/// Depending on the driver a skipped insert is reported as zero affected rows or as
/// `DbErr::RecordNotInserted`; both mean the row already existed.
pub(crate) fn inserted(result: Result<u64, DbErr>) -> Result<bool, DbErr> {
    match result {
        Ok(rows) => Ok(rows > 0),
        Err(DbErr::RecordNotInserted) => Ok(false),
        Err(err) => Err(err),
    }
}
