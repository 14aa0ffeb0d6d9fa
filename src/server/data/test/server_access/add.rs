use super::*;

/// Tests adding a member twice.
///
/// Expected: Ok(true) then Ok(false), with a single row left
#[tokio::test]
async fn add_is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, server) = factory::helpers::create_server_with_owner(db).await?;
    let member = factory::create_account(db).await?;
    let repo = ServerAccessRepository::new(db);

    assert!(repo.add(&member.id, &server.id, AccessRole::Member).await?);
    assert!(!repo.add(&member.id, &server.id, AccessRole::Member).await?);

    let members = repo.accounts_for_server(&server.id).await?;
    assert_eq!(members.len(), 2);

    Ok(())
}

/// Tests that adding a member row for the owner does not demote the owner.
///
/// Expected: Ok(false) and the owner keeps the Owner level
#[tokio::test]
async fn does_not_overwrite_owner_row() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, server) = factory::helpers::create_server_with_owner(db).await?;
    let repo = ServerAccessRepository::new(db);

    assert!(!repo.add(&owner.id, &server.id, AccessRole::Member).await?);
    assert_eq!(repo.access_level(&owner.id, &server.id).await?, AccessLevel::Owner);

    Ok(())
}
