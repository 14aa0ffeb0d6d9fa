use super::*;

/// Tests setting the password of an account that has none.
///
/// Expected: Ok(true) and the hash stored
#[tokio::test]
async fn sets_hash_when_unset() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Account)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let account = factory::create_account(db).await?;
    let repo = AccountRepository::new(db);

    assert!(repo.set_password_hash(&account.id, "$2b$10$first").await?);

    let stored = repo.find_by_id(&account.id).await?.unwrap();
    assert_eq!(stored.password_hash.as_deref(), Some("$2b$10$first"));

    Ok(())
}

/// Tests that an existing password is never replaced.
///
/// Expected: Ok(false) and the original hash kept
#[tokio::test]
async fn keeps_existing_hash() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Account)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let account = factory::account::AccountFactory::new(db)
        .password_hash("$2b$10$original")
        .build()
        .await?;
    let repo = AccountRepository::new(db);

    assert!(!repo.set_password_hash(&account.id, "$2b$10$other").await?);

    let stored = repo.find_by_id(&account.id).await?.unwrap();
    assert_eq!(stored.password_hash.as_deref(), Some("$2b$10$original"));

    Ok(())
}

/// Tests setting a password for an unknown account.
///
/// Expected: Ok(false)
#[tokio::test]
async fn ignores_unknown_account() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Account)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AccountRepository::new(db);

    assert!(!repo.set_password_hash("ACC-missing", "$2b$10$x").await?);

    Ok(())
}
