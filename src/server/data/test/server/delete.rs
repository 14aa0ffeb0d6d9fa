use super::*;

/// Tests deleting an existing server.
///
/// Expected: Ok(true), then Ok(false) for the repeated delete
#[tokio::test]
async fn deletes_server_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Account)
        .with_table(entity::prelude::Server)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_account(db).await?;
    let server = factory::create_server(db, &owner.id).await?;
    let repo = ServerRepository::new(db);

    assert!(repo.delete(&server.id).await?);
    assert!(!repo.delete(&server.id).await?);
    assert!(repo.find_by_id(&server.id).await?.is_none());

    Ok(())
}
