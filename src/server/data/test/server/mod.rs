use crate::server::{
    data::server::ServerRepository,
    model::server::{CreateServerParam, ServerPlan, UpdateServerSettingsParam},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod find_by_ids;
mod update_settings;
