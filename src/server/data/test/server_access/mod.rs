use crate::server::{data::server_access::ServerAccessRepository, model::access::AccessLevel};
use entity::server_access::AccessRole;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod access_level;
mod add;
mod delete_orphans;
mod remove;
mod server_ids_for_account;
