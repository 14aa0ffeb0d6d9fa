//! Username/password authentication.
//!
//! Provides signup, login, logout and the first-time password setup for accounts that
//! were created through Discord. Successful authentication issues a session through the
//! `SessionManager`.

use sea_orm::{DatabaseConnection, SqlErr};

use crate::server::{
    data::account::AccountRepository,
    error::{auth::AuthError, AppError},
    model::account::{Account, CreateAccountParam},
    service::session::SessionManager,
    util::{
        id::generate_account_id,
        password::{hash_password, verify_password},
        validate::{validate_password, validate_username},
    },
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    sessions: &'a SessionManager,
}

impl<'a> AuthService<'a> {
    /// Creates a new AuthService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `sessions` - Session manager used to issue and destroy sessions
    ///
    /// # Returns
    /// - `AuthService` - New service instance
    pub fn new(db: &'a DatabaseConnection, sessions: &'a SessionManager) -> Self {
        Self { db, sessions }
    }

    /// Registers a new account.
    ///
    /// # Arguments
    /// - `username` - 3 to 32 characters of `[A-Za-z0-9_.-]`, unique
    /// - `password` - at least 6 characters
    ///
    /// # Returns
    /// - `Ok(Account)` - The created account
    /// - `Err(AppError::BadRequest)` - Username or password fails validation
    /// - `Err(AppError::AuthErr(UsernameTaken))` - Username already registered
    pub async fn signup(&self, username: &str, password: &str) -> Result<Account, AppError> {
        validate_username(username)?;
        validate_password(password)?;

        let repo = AccountRepository::new(self.db);
        if repo.find_by_username(username).await?.is_some() {
            return Err(AuthError::UsernameTaken(username.to_string()).into());
        }

        let password_hash = hash_password(password).await?;

        let account = repo
            .create(CreateAccountParam {
                id: generate_account_id(),
                username: username.to_string(),
                password_hash: Some(password_hash),
                discord_id: None,
            })
            .await
            .map_err(|err| match err.sql_err() {
                // Lost a race with a concurrent signup for the same name.
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    AuthError::UsernameTaken(username.to_string()).into()
                }
                _ => AppError::from(err),
            })?;

        tracing::info!("Account {} signed up as {}", account.id, account.username);

        Ok(account)
    }

    /// Verifies credentials and issues a session.
    ///
    /// Unknown usernames, accounts without a password and wrong passwords all produce
    /// the same `InvalidCredentials` error.
    ///
    /// # Returns
    /// - `Ok((Account, String))` - Authenticated account and its new session token
    /// - `Err(AppError::AuthErr(InvalidCredentials))` - Authentication failed
    pub async fn login(&self, username: &str, password: &str) -> Result<(Account, String), AppError> {
        let Some(account) = AccountRepository::new(self.db)
            .find_by_username(username)
            .await?
        else {
            return Err(AuthError::InvalidCredentials.into());
        };

        let Some(password_hash) = account.password_hash.as_deref() else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, password_hash).await? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.sessions.create_session(&account.id).await?;

        Ok((account, token))
    }

    /// Sets the password on first use, otherwise verifies it, then issues a session.
    ///
    /// Used after a Discord login: accounts created through Discord have no password
    /// until the first call. A first password is only accepted when `linked_account_id`
    /// (the account the caller's own Discord callback resolved) is `account_id`.
    ///
    /// # Returns
    /// - `Ok((Account, String))` - Account and its new session token
    /// - `Err(AppError::AuthErr(AccountNotFound))` - No such account
    /// - `Err(AppError::AuthErr(InvalidCredentials))` - Wrong password, or a first
    ///   password for an account this caller did not log in to through Discord
    /// - `Err(AppError::BadRequest)` - First password is too short
    pub async fn check_password(
        &self,
        account_id: &str,
        password: &str,
        linked_account_id: Option<&str>,
    ) -> Result<(Account, String), AppError> {
        let repo = AccountRepository::new(self.db);
        let Some(account) = repo.find_by_id(account_id).await? else {
            return Err(AuthError::AccountNotFound(account_id.to_string()).into());
        };

        let verified = match account.password_hash.as_deref() {
            Some(hash) => verify_password(password, hash).await?,
            None if linked_account_id != Some(account_id) => {
                tracing::warn!(
                    "Rejected first password for account {} without its Discord login",
                    account_id
                );
                false
            }
            None => {
                validate_password(password)?;
                let hash = hash_password(password).await?;

                if repo.set_password_hash(account_id, &hash).await? {
                    tracing::info!("Account {} set its password", account_id);
                    true
                } else {
                    // Another request set the password first; check against that one.
                    match repo
                        .find_by_id(account_id)
                        .await?
                        .and_then(|account| account.password_hash)
                    {
                        Some(stored) => verify_password(password, &stored).await?,
                        None => false,
                    }
                }
            }
        };

        if !verified {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.sessions.create_session(&account.id).await?;

        Ok((account, token))
    }

    /// Destroys a session. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        self.sessions.destroy_session(token).await
    }
}
