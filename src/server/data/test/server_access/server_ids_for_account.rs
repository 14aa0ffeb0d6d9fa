use super::*;

/// Tests that an account's owned and member sets are reported separately.
///
/// Expected: Ok with each server in exactly one of the two lists
#[tokio::test]
async fn splits_owned_and_member_servers() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (account, owned) = factory::helpers::create_server_with_owner(db).await?;
    let (_, joined) = factory::helpers::create_server_with_owner(db).await?;
    factory::add_member(db, &account.id, &joined.id).await?;

    let repo = ServerAccessRepository::new(db);

    assert_eq!(
        repo.server_ids_for_account(&account.id, AccessRole::Owner).await?,
        vec![owned.id]
    );
    assert_eq!(
        repo.server_ids_for_account(&account.id, AccessRole::Member).await?,
        vec![joined.id]
    );

    Ok(())
}

/// Tests the member listing of a server.
///
/// Expected: Ok with the owner first and usernames resolved
#[tokio::test]
async fn lists_accounts_for_server_owner_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, server) = factory::helpers::create_server_with_owner(db).await?;
    let member = factory::create_account(db).await?;
    factory::add_member(db, &member.id, &server.id).await?;

    let members = ServerAccessRepository::new(db)
        .accounts_for_server(&server.id)
        .await?;

    assert_eq!(members.len(), 2);
    assert_eq!(members[0].account_id, owner.id);
    assert_eq!(members[0].level, AccessLevel::Owner);
    assert_eq!(members[1].username, member.username);
    assert_eq!(members[1].level, AccessLevel::Member);

    Ok(())
}
