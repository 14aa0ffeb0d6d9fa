use super::*;

/// Tests creating a server without an API key.
///
/// Expected: Ok with the free plan and no key configured
#[tokio::test]
async fn creates_server_on_free_plan() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Account)
        .with_table(entity::prelude::Server)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_account(db).await?;
    let repo = ServerRepository::new(db);
    let server = repo
        .create(CreateServerParam {
            id: "SRV-1".to_string(),
            name: "Liberty County".to_string(),
            description: Some("Serious RP".to_string()),
            owner_account_id: owner.id.clone(),
            erlc_server_id: None,
            api_key_encrypted: None,
            plan: ServerPlan::default(),
        })
        .await?;

    assert_eq!(server.plan, "free");
    assert!(!server.api_key_configured());
    assert_eq!(repo.find_by_id("SRV-1").await?, Some(server));

    Ok(())
}

/// Tests looking up a server that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_server() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Account)
        .with_table(entity::prelude::Server)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ServerRepository::new(db);

    assert!(repo.find_by_id("SRV-missing").await?.is_none());

    Ok(())
}
