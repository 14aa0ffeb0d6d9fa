use super::*;

fn param(new_account_id: &str, discord_id: &str, username: &str) -> UpsertDiscordAccountParam {
    UpsertDiscordAccountParam {
        new_account_id: new_account_id.to_string(),
        discord_id: discord_id.to_string(),
        username: username.to_string(),
    }
}

/// Tests the first Discord login for a Discord user.
///
/// Expected: Ok with a new password-less account linked to the Discord id
#[tokio::test]
async fn creates_account_on_first_login() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Account)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AccountRepository::new(db);
    let (account, created) = repo
        .upsert_discord(param("ACC-d1", "123456789", "discorduser"))
        .await?;

    assert!(created);
    assert_eq!(account.id, "ACC-d1");
    assert_eq!(account.discord_id.as_deref(), Some("123456789"));
    assert!(!account.has_password());

    Ok(())
}

/// Tests a repeated Discord login after the Discord username changed.
///
/// Expected: Ok with the same account id and the refreshed username
#[tokio::test]
async fn refreshes_username_on_later_login() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Account)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AccountRepository::new(db);
    repo.upsert_discord(param("ACC-d1", "123456789", "oldname"))
        .await?;
    let (account, created) = repo
        .upsert_discord(param("ACC-ignored", "123456789", "newname"))
        .await?;

    assert!(!created);
    assert_eq!(account.id, "ACC-d1");
    assert_eq!(account.username, "newname");
    assert_eq!(repo.find_by_id("ACC-d1").await?.unwrap().username, "newname");
    assert!(repo.find_by_id("ACC-ignored").await?.is_none());

    Ok(())
}
