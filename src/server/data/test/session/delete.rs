use super::*;

/// Tests deleting a session twice.
///
/// Expected: Ok(true) then Ok(false); the session no longer resolves
#[tokio::test]
async fn delete_is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let account = factory::create_account(db).await?;
    factory::create_session(db, &account.id, "hash-1").await?;
    let repo = SessionRepository::new(db);

    assert!(repo.delete("hash-1").await?);
    assert!(!repo.delete("hash-1").await?);
    assert!(repo.find_account_id("hash-1").await?.is_none());

    Ok(())
}
