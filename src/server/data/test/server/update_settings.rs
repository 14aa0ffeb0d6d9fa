use super::*;

/// Tests a partial settings update.
///
/// Expected: Ok with only the provided fields changed
#[tokio::test]
async fn updates_only_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Account)
        .with_table(entity::prelude::Server)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_account(db).await?;
    let server = factory::server::ServerFactory::new(db, &owner.id)
        .name("Before")
        .erlc_server_id("ext-1")
        .build()
        .await?;
    let repo = ServerRepository::new(db);

    let updated = repo
        .update_settings(
            &server.id,
            UpdateServerSettingsParam {
                api_key_encrypted: Some("ciphertext".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.name, "Before");
    assert_eq!(updated.erlc_server_id.as_deref(), Some("ext-1"));
    assert_eq!(updated.plan, "free");
    assert!(updated.api_key_configured());
    assert!(updated.updated_at >= server.updated_at);

    Ok(())
}

/// Tests clearing nullable fields.
///
/// Expected: Ok with description and external id removed
#[tokio::test]
async fn clears_nullable_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Account)
        .with_table(entity::prelude::Server)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_account(db).await?;
    let server = factory::server::ServerFactory::new(db, &owner.id)
        .erlc_server_id("ext-1")
        .build()
        .await?;
    let repo = ServerRepository::new(db);

    let updated = repo
        .update_settings(
            &server.id,
            UpdateServerSettingsParam {
                name: Some("Renamed".to_string()),
                description: Some(None),
                erlc_server_id: Some(None),
                api_key_encrypted: None,
                plan: None,
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert!(updated.description.is_none());
    assert!(updated.erlc_server_id.is_none());

    Ok(())
}

/// Tests switching a server's plan.
///
/// Expected: Ok with the new plan stored and other fields unchanged
#[tokio::test]
async fn changes_plan() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Account)
        .with_table(entity::prelude::Server)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_account(db).await?;
    let server = factory::server::ServerFactory::new(db, &owner.id)
        .name("Before")
        .build()
        .await?;
    let repo = ServerRepository::new(db);

    let updated = repo
        .update_settings(
            &server.id,
            UpdateServerSettingsParam {
                plan: Some(ServerPlan::Premium),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.plan, "premium");
    assert_eq!(updated.name, "Before");
    assert_eq!(repo.find_by_id(&server.id).await?.unwrap().plan, "premium");

    Ok(())
}

/// Tests updating a server that does not exist.
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
    let result = repo
        .update_settings("SRV-missing", UpdateServerSettingsParam::default())
        .await?;

    assert!(result.is_none());

    Ok(())
}
