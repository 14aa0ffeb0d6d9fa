use super::*;

/// Tests the classification of owner, member and unrelated accounts.
///
/// Expected: Owner for the owner row, Member for a member row, NoAccess otherwise
#[tokio::test]
async fn classifies_each_relation() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, server) = factory::helpers::create_server_with_owner(db).await?;
    let member = factory::create_account(db).await?;
    let stranger = factory::create_account(db).await?;
    factory::add_member(db, &member.id, &server.id).await?;

    let repo = ServerAccessRepository::new(db);

    assert_eq!(repo.access_level(&owner.id, &server.id).await?, AccessLevel::Owner);
    assert_eq!(repo.access_level(&member.id, &server.id).await?, AccessLevel::Member);
    assert_eq!(
        repo.access_level(&stranger.id, &server.id).await?,
        AccessLevel::NoAccess
    );
    assert_eq!(
        repo.access_level(&owner.id, "SRV-missing").await?,
        AccessLevel::NoAccess
    );

    Ok(())
}
