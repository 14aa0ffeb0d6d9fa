use super::*;

/// Tests fetching several servers at once.
///
/// Expected: Ok with only the existing servers
#[tokio::test]
async fn skips_unknown_ids() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Account)
        .with_table(entity::prelude::Server)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_account(db).await?;
    let first = factory::create_server(db, &owner.id).await?;
    let second = factory::create_server(db, &owner.id).await?;
    let repo = ServerRepository::new(db);

    let servers = repo
        .find_by_ids(&[first.id.clone(), "SRV-missing".to_string(), second.id.clone()])
        .await?;

    let mut ids: Vec<String> = servers.into_iter().map(|s| s.id).collect();
    ids.sort();
    let mut expected = vec![first.id, second.id];
    expected.sort();
    assert_eq!(ids, expected);

    Ok(())
}

/// Tests fetching with an empty id list.
///
/// Expected: Ok with no servers and no query error
#[tokio::test]
async fn empty_input_returns_empty() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Account)
        .with_table(entity::prelude::Server)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ServerRepository::new(db);

    assert!(repo.find_by_ids(&[]).await?.is_empty());

    Ok(())
}
