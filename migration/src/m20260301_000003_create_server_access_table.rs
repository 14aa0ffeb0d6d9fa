use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_account_table::Account;
use super::m20260301_000002_create_server_table::Server;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServerAccess::Table)
                    .if_not_exists()
                    .col(string(ServerAccess::AccountId))
                    .col(string(ServerAccess::ServerId))
                    .col(string_len(ServerAccess::Role, 16))
                    .col(
                        timestamp_with_time_zone(ServerAccess::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_server_access")
                            .col(ServerAccess::AccountId)
                            .col(ServerAccess::ServerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_server_access_account_id")
                            .from(ServerAccess::Table, ServerAccess::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_server_access_server_id")
                            .from(ServerAccess::Table, ServerAccess::ServerId)
                            .to(Server::Table, Server::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_server_access_server_id")
                    .table(ServerAccess::Table)
                    .col(ServerAccess::ServerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServerAccess::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ServerAccess {
    Table,
    AccountId,
    ServerId,
    Role,
    CreatedAt,
}
