use super::*;

/// Tests storing a session and resolving it.
///
/// Expected: Ok(true) and the account id returned for the hash
#[tokio::test]
async fn stores_and_resolves_session() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let account = factory::create_account(db).await?;
    let repo = SessionRepository::new(db);

    assert!(repo.insert("hash-1", &account.id).await?);
    assert_eq!(repo.find_account_id("hash-1").await?, Some(account.id));
    assert_eq!(repo.find_account_id("hash-2").await?, None);

    Ok(())
}

/// Tests a colliding token hash.
///
/// Expected: Ok(false) and the original session still mapped to its account
#[tokio::test]
async fn never_overwrites_existing_session() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_account(db).await?;
    let second = factory::create_account(db).await?;
    factory::create_session(db, &first.id, "hash-1").await?;
    let repo = SessionRepository::new(db);

    assert!(!repo.insert("hash-1", &second.id).await?);
    assert_eq!(repo.find_account_id("hash-1").await?, Some(first.id));

    Ok(())
}
