use super::*;

/// Tests removing a member.
///
/// Expected: Ok(true) then Ok(false) and the member has no access left
#[tokio::test]
async fn removes_member_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, server) = factory::helpers::create_server_with_owner(db).await?;
    let member = factory::create_account(db).await?;
    factory::add_member(db, &member.id, &server.id).await?;
    let repo = ServerAccessRepository::new(db);

    assert!(repo.remove(&member.id, &server.id, AccessRole::Member).await?);
    assert!(!repo.remove(&member.id, &server.id, AccessRole::Member).await?);
    assert_eq!(
        repo.access_level(&member.id, &server.id).await?,
        AccessLevel::NoAccess
    );

    Ok(())
}

/// Tests that removing with the member role leaves an owner row alone.
///
/// Expected: Ok(false) and the owner keeps the Owner level
#[tokio::test]
async fn member_removal_keeps_owner() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, server) = factory::helpers::create_server_with_owner(db).await?;
    let repo = ServerAccessRepository::new(db);

    assert!(!repo.remove(&owner.id, &server.id, AccessRole::Member).await?);
    assert_eq!(repo.access_level(&owner.id, &server.id).await?, AccessLevel::Owner);

    Ok(())
}
