use entity::server_access::AccessRole;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{account::AccountRepository, server_access::ServerAccessRepository},
    error::{auth::AuthError, AppError},
    model::account::AccountProfile,
};

pub struct AccountService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AccountService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads an account with its owned and member server IDs.
    ///
    /// # Returns
    /// - `Ok(AccountProfile)` - Account and its server ID sets
    /// - `Err(AppError::AuthErr(AccountNotFound))` - No such account
    pub async fn profile(&self, account_id: &str) -> Result<AccountProfile, AppError> {
        let Some(account) = AccountRepository::new(self.db).find_by_id(account_id).await? else {
            return Err(AuthError::AccountNotFound(account_id.to_string()).into());
        };

        let access_repo = ServerAccessRepository::new(self.db);

        Ok(AccountProfile {
            owned_server_ids: access_repo
                .server_ids_for_account(account_id, AccessRole::Owner)
                .await?,
            member_server_ids: access_repo
                .server_ids_for_account(account_id, AccessRole::Member)
                .await?,
            account,
        })
    }
}

#[cfg(test)]
mod tests {
    use test_utils::{builder::TestBuilder, factory};

    use super::*;

    /// Tests loading the profile of an account that owns one server and joined another.
    ///
    /// Expected: Ok with disjoint owned and member server id lists
    #[tokio::test]
    async fn loads_profile_with_server_ids() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let (account, owned) = factory::helpers::create_server_with_owner(db).await?;
        let (_, joined) = factory::helpers::create_server_with_owner(db).await?;
        factory::add_member(db, &account.id, &joined.id).await?;

        let profile = AccountService::new(db).profile(&account.id).await?;

        assert_eq!(profile.account.username, account.username);
        assert_eq!(profile.owned_server_ids, vec![owned.id]);
        assert_eq!(profile.member_server_ids, vec![joined.id]);

        Ok(())
    }

    /// Tests loading the profile of an unknown account.
    ///
    /// Expected: Err(AccountNotFound)
    #[tokio::test]
    async fn unknown_account_is_not_found() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let result = AccountService::new(db).profile("ACC-missing").await;

        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::AccountNotFound(_)))
        ));

        Ok(())
    }
}
