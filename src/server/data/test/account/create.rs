use super::*;

fn param(id: &str, username: &str) -> CreateAccountParam {
    CreateAccountParam {
        id: id.to_string(),
        username: username.to_string(),
        password_hash: Some("$2b$10$hash".to_string()),
        discord_id: None,
    }
}

/// Tests creating an account and reading it back by id and username.
///
/// Expected: Ok with the same account returned by both lookups
#[tokio::test]
async fn creates_and_finds_account() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Account)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AccountRepository::new(db);
    let created = repo.create(param("ACC-1", "alice")).await?;

    assert_eq!(created.id, "ACC-1");
    assert!(created.has_password());
    assert_eq!(repo.find_by_id("ACC-1").await?, Some(created.clone()));
    assert_eq!(repo.find_by_username("alice").await?, Some(created));

    Ok(())
}

/// Tests that usernames are unique.
///
/// Expected: Err for the second account with the same username
#[tokio::test]
async fn rejects_duplicate_username() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Account)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AccountRepository::new(db);
    repo.create(param("ACC-1", "alice")).await?;
    let result = repo.create(param("ACC-2", "alice")).await;

    assert!(result.is_err());

    Ok(())
}

/// Tests lookups for accounts that do not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_account() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Account)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AccountRepository::new(db);

    assert!(repo.find_by_id("ACC-missing").await?.is_none());
    assert!(repo.find_by_username("nobody").await?.is_none());

    Ok(())
}
