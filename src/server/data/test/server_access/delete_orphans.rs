use sea_orm::ConnectionTrait;

use super::*;

/// Tests the reconciliation of access rows left behind by a deleted server.
///
/// Foreign keys are switched off to simulate rows written before the server
/// deletion became transactional.
///
/// Expected: Ok(1) with only the orphaned row removed
#[tokio::test]
async fn deletes_only_orphaned_rows() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    db.execute_unprepared("PRAGMA foreign_keys = OFF").await?;

    let (owner, server) = factory::helpers::create_server_with_owner(db).await?;
    factory::add_member(db, &owner.id, "SRV-gone").await?;

    let repo = ServerAccessRepository::new(db);

    assert_eq!(repo.delete_orphans().await?, 1);
    assert_eq!(repo.access_level(&owner.id, &server.id).await?, AccessLevel::Owner);
    assert_eq!(
        repo.access_level(&owner.id, "SRV-gone").await?,
        AccessLevel::NoAccess
    );
    assert_eq!(repo.delete_orphans().await?, 0);

    Ok(())
}
