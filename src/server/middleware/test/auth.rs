use super::*;

/// Tests token extraction from the `Authorization` header.
///
/// Expected: raw and Bearer tokens accepted, blank header ignored
#[test]
fn extracts_raw_and_bearer_tokens() {
    assert_eq!(session_token(&headers_with("abc")), Some("abc"));
    assert_eq!(session_token(&headers_with("Bearer abc")), Some("abc"));
    assert_eq!(session_token(&headers_with("   ")), None);
    assert_eq!(session_token(&HeaderMap::new()), None);
}

/// Tests a request with a valid session token.
///
/// Expected: Ok(Account) of the session owner
#[tokio::test]
async fn resolves_account_from_session() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let account = factory::create_account(db).await?;
    let sessions = SessionManager::database(db.clone());
    let token = sessions.create_session(&account.id).await?;

    let headers = headers_with(&format!("Bearer {}", token));
    let caller = AuthGuard::new(db, &sessions, AuthMode::Session, &headers)
        .require(Some(&account.id))
        .await?;

    assert_eq!(caller.id, account.id);

    Ok(())
}

/// Tests a request without any token.
///
/// Expected: Err(MissingToken), even with an accountId given
#[tokio::test]
async fn rejects_missing_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let account = factory::create_account(db).await?;
    let sessions = SessionManager::memory();
    let headers = HeaderMap::new();

    let result = AuthGuard::new(db, &sessions, AuthMode::Session, &headers)
        .require(Some(&account.id))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));

    Ok(())
}

/// Tests a token that was never issued.
///
/// Expected: Err(InvalidSession)
#[tokio::test]
async fn rejects_unknown_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let sessions = SessionManager::memory();
    let headers = headers_with("not-a-session");

    let result = AuthGuard::new(db, &sessions, AuthMode::Session, &headers)
        .require(None)
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidSession))
    ));

    Ok(())
}

/// Tests a request naming another account than its session.
///
/// Expected: Err(AccountMismatch)
#[tokio::test]
async fn rejects_mismatched_account_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let alice = factory::create_account(db).await?;
    let bob = factory::create_account(db).await?;
    let sessions = SessionManager::memory();
    let token = sessions.create_session(&bob.id).await?;

    let headers = headers_with(&token);
    let result = AuthGuard::new(db, &sessions, AuthMode::Session, &headers)
        .require(Some(&alice.id))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccountMismatch { .. }))
    ));

    Ok(())
}

/// Tests a session whose account was deleted.
///
/// Expected: Err(AccountNotFound)
#[tokio::test]
async fn rejects_session_of_missing_account() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let sessions = SessionManager::memory();
    let token = sessions.create_session("ACC-gone").await?;

    let headers = headers_with(&token);
    let result = AuthGuard::new(db, &sessions, AuthMode::Session, &headers)
        .require(None)
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccountNotFound(ref id))) if id == "ACC-gone"
    ));

    Ok(())
}

/// Tests trust mode without a token.
///
/// Expected: Ok(Account) named by accountId; still MissingToken without one
#[tokio::test]
async fn trust_mode_uses_claimed_account() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let account = factory::create_account(db).await?;
    let sessions = SessionManager::memory();
    let headers = HeaderMap::new();
    let guard = AuthGuard::new(db, &sessions, AuthMode::TrustAccountId, &headers);

    let caller = guard.require(Some(&account.id)).await?;
    let anonymous = guard.require(None).await;

    assert_eq!(caller.id, account.id);
    assert!(matches!(
        anonymous,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));

    Ok(())
}
