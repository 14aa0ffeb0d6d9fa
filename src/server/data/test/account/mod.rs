use crate::server::{
    data::account::AccountRepository,
    model::account::{CreateAccountParam, UpsertDiscordAccountParam},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod set_password_hash;
mod upsert_discord;
