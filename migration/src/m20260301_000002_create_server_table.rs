use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_account_table::Account;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Server::Table)
                    .if_not_exists()
                    .col(string(Server::Id).primary_key())
                    .col(string(Server::Name))
                    .col(text_null(Server::Description))
                    .col(string(Server::OwnerAccountId))
                    .col(string_null(Server::ErlcServerId))
                    .col(text_null(Server::ApiKeyEncrypted))
                    .col(string(Server::Plan).default("free"))
                    .col(
                        timestamp_with_time_zone(Server::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Server::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_server_owner_account_id")
                            .from(Server::Table, Server::OwnerAccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Server::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Server {
    Table,
    Id,
    Name,
    Description,
    OwnerAccountId,
    ErlcServerId,
    ApiKeyEncrypted,
    Plan,
    CreatedAt,
    UpdatedAt,
}
