//! Server management: creation, settings, deletion and membership.
//!
//! Creation inserts the server and the owner's access row in one transaction; deletion
//! removes every access row and the server in one transaction. Settings and membership
//! changes are authorized through `AccessService`.

use entity::server_access::AccessRole;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        account::AccountRepository, server::ServerRepository,
        server_access::ServerAccessRepository,
    },
    error::{auth::AuthError, internal::InternalError, AppError},
    model::{
        access::{AccessLevel, ServerAccess},
        server::{CreateServerParam, Member, Server, ServerPlan, UpdateServerSettingsParam},
    },
    service::access::AccessService,
    util::{crypto::ApiKeyCipher, id::generate_server_id},
};

const SERVER_NAME_MAX_LEN: usize = 100;
const MAX_ID_ATTEMPTS: u32 = 3;

/// Input for creating a server, as received from the client.
#[derive(Debug, Clone, Default)]
pub struct CreateServerInput {
    pub name: String,
    pub description: Option<String>,
    pub api_key: Option<String>,
    pub erlc_server_id: Option<String>,
    /// Plan name; `None` starts the server on the free plan.
    pub plan: Option<String>,
}

/// Input for a settings update, as received from the client. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct UpdateSettingsInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub api_key: Option<String>,
    pub erlc_server_id: Option<String>,
    pub plan: Option<String>,
}

/// Servers of one account, split by relation.
#[derive(Debug, Clone, Default)]
pub struct AccountServers {
    pub owned: Vec<Server>,
    pub member: Vec<Server>,
}

pub struct ServerService<'a> {
    db: &'a DatabaseConnection,
    cipher: &'a ApiKeyCipher,
}

impl<'a> ServerService<'a> {
    /// Creates a new ServerService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `cipher` - Cipher used to encrypt API keys before they are stored
    ///
    /// # Returns
    /// - `ServerService` - New service instance
    pub fn new(db: &'a DatabaseConnection, cipher: &'a ApiKeyCipher) -> Self {
        Self { db, cipher }
    }

    /// Creates a server owned by `owner_account_id`.
    ///
    /// The API key, if given, is encrypted before it is written. The server row and the
    /// owner's access row are inserted in a single transaction.
    ///
    /// # Arguments
    /// - `owner_account_id` - Authenticated caller, becomes the owner
    /// - `input` - Name, optional description, API key and external server ID
    ///
    /// # Returns
    /// - `Ok(Server)` - The created server
    /// - `Err(AppError::BadRequest)` - Invalid name or unknown plan
    /// - `Err(AppError::AuthErr(AccountNotFound))` - Owner account does not exist
    /// - `Err(AppError::DbErr)` - Database error; nothing was written
    pub async fn create(
        &self,
        owner_account_id: &str,
        input: CreateServerInput,
    ) -> Result<Server, AppError> {
        let name = validate_name(&input.name)?;
        let plan = input
            .plan
            .as_deref()
            .map(validate_plan)
            .transpose()?
            .unwrap_or_default();
        let api_key_encrypted = match non_empty(input.api_key) {
            Some(api_key) => Some(self.cipher.encrypt(&api_key)?),
            None => None,
        };

        let txn = self.db.begin().await?;

        if AccountRepository::new(&txn)
            .find_by_id(owner_account_id)
            .await?
            .is_none()
        {
            return Err(AuthError::AccountNotFound(owner_account_id.to_string()).into());
        }

        let server_repo = ServerRepository::new(&txn);
        let mut server_id = None;
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = generate_server_id();
            if server_repo.find_by_id(&candidate).await?.is_none() {
                server_id = Some(candidate);
                break;
            }
        }
        let server_id =
            server_id.ok_or(InternalError::IdentifierCollision("server id", MAX_ID_ATTEMPTS))?;

        let server = server_repo
            .create(CreateServerParam {
                id: server_id,
                name,
                description: non_empty(input.description),
                owner_account_id: owner_account_id.to_string(),
                erlc_server_id: non_empty(input.erlc_server_id),
                api_key_encrypted,
                plan,
            })
            .await?;

        ServerAccessRepository::new(&txn)
            .add(owner_account_id, &server.id, AccessRole::Owner)
            .await?;

        txn.commit().await?;

        tracing::info!(
            "Account {} created server {} ({})",
            owner_account_id,
            server.id,
            server.name
        );

        Ok(server)
    }

    /// Lists the servers an account owns and the servers it is a member of.
    pub async fn list_for_account(&self, account_id: &str) -> Result<AccountServers, AppError> {
        let access_repo = ServerAccessRepository::new(self.db);
        let server_repo = ServerRepository::new(self.db);

        let owned_ids = access_repo
            .server_ids_for_account(account_id, AccessRole::Owner)
            .await?;
        let member_ids = access_repo
            .server_ids_for_account(account_id, AccessRole::Member)
            .await?;

        Ok(AccountServers {
            owned: server_repo.find_by_ids(&owned_ids).await?,
            member: server_repo.find_by_ids(&member_ids).await?,
        })
    }

    /// Reads a server's settings. Requires member access.
    pub async fn settings(
        &self,
        account_id: &str,
        server_id: &str,
    ) -> Result<ServerAccess, AppError> {
        AccessService::new(self.db, self.cipher)
            .authorize(account_id, server_id, AccessLevel::Member)
            .await
    }

    /// Updates a server's settings. Requires owner access.
    ///
    /// An empty description or external server ID clears the field. An API key, when
    /// present, must be non-empty and replaces the stored key.
    ///
    /// # Returns
    /// - `Ok(Server)` - The updated server
    /// - `Err(AppError::BadRequest)` - Empty name or API key, unknown plan
    /// - any error of `AccessService::authorize`
    pub async fn update_settings(
        &self,
        account_id: &str,
        server_id: &str,
        input: UpdateSettingsInput,
    ) -> Result<Server, AppError> {
        AccessService::new(self.db, self.cipher)
            .authorize(account_id, server_id, AccessLevel::Owner)
            .await?;

        let name = input.name.as_deref().map(validate_name).transpose()?;
        let plan = input.plan.as_deref().map(validate_plan).transpose()?;
        let api_key_encrypted = match input.api_key {
            Some(api_key) if api_key.trim().is_empty() => {
                return Err(AppError::BadRequest(
                    "API key must not be empty.".to_string(),
                ))
            }
            Some(api_key) => Some(self.cipher.encrypt(api_key.trim())?),
            None => None,
        };
        let key_rotated = api_key_encrypted.is_some();

        let server = ServerRepository::new(self.db)
            .update_settings(
                server_id,
                UpdateServerSettingsParam {
                    name,
                    description: input.description.map(|d| non_empty(Some(d))),
                    erlc_server_id: input.erlc_server_id.map(|id| non_empty(Some(id))),
                    api_key_encrypted,
                    plan,
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Server not found".to_string()))?;

        if key_rotated {
            tracing::info!(
                "Account {} updated the API key of server {}",
                account_id,
                server_id
            );
        }

        Ok(server)
    }

    /// Deletes a server and every access row referencing it. Requires owner access.
    ///
    /// Both deletions run in one transaction, so no account is left pointing at the
    /// deleted server.
    pub async fn delete(&self, account_id: &str, server_id: &str) -> Result<(), AppError> {
        AccessService::new(self.db, self.cipher)
            .authorize(account_id, server_id, AccessLevel::Owner)
            .await?;

        let txn = self.db.begin().await?;

        let removed_access = ServerAccessRepository::new(&txn)
            .delete_for_server(server_id)
            .await?;
        ServerRepository::new(&txn).delete(server_id).await?;

        txn.commit().await?;

        tracing::info!(
            "Account {} deleted server {} ({} access rows removed)",
            account_id,
            server_id,
            removed_access
        );

        Ok(())
    }

    /// Lists the accounts with access to a server. Requires member access.
    pub async fn members(&self, account_id: &str, server_id: &str) -> Result<Vec<Member>, AppError> {
        AccessService::new(self.db, self.cipher)
            .authorize(account_id, server_id, AccessLevel::Member)
            .await?;

        Ok(ServerAccessRepository::new(self.db)
            .accounts_for_server(server_id)
            .await?)
    }

    /// Adds the account with `username` as member. Requires owner access.
    ///
    /// # Returns
    /// - `Ok(true)` - Member added
    /// - `Ok(false)` - Account already had access (member or owner)
    /// - `Err(AppError::NotFound)` - No account with that username
    pub async fn add_member(
        &self,
        account_id: &str,
        server_id: &str,
        username: &str,
    ) -> Result<bool, AppError> {
        AccessService::new(self.db, self.cipher)
            .authorize(account_id, server_id, AccessLevel::Owner)
            .await?;

        let Some(member) = AccountRepository::new(self.db)
            .find_by_username(username)
            .await?
        else {
            return Err(AppError::NotFound(format!(
                "No account with username {}",
                username
            )));
        };

        let added = ServerAccessRepository::new(self.db)
            .add(&member.id, server_id, AccessRole::Member)
            .await?;

        if added {
            tracing::info!("Account {} added {} to server {}", account_id, member.id, server_id);
        }

        Ok(added)
    }

    /// Removes a member. Requires owner access; the owner row cannot be removed this way.
    ///
    /// # Returns
    /// - `Ok(true)` - Member removed
    /// - `Ok(false)` - Account was not a member
    /// - `Err(AppError::BadRequest)` - Attempt to remove the owner
    pub async fn remove_member(
        &self,
        account_id: &str,
        server_id: &str,
        member_account_id: &str,
    ) -> Result<bool, AppError> {
        let access = AccessService::new(self.db, self.cipher)
            .authorize(account_id, server_id, AccessLevel::Owner)
            .await?;

        if access.server.owner_account_id == member_account_id {
            return Err(AppError::BadRequest(
                "The server owner cannot be removed.".to_string(),
            ));
        }

        let removed = ServerAccessRepository::new(self.db)
            .remove(member_account_id, server_id, AccessRole::Member)
            .await?;

        if removed {
            tracing::info!(
                "Account {} removed {} from server {}",
                account_id,
                member_account_id,
                server_id
            );
        }

        Ok(removed)
    }
}

fn validate_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Server name is required.".to_string()));
    }
    if name.chars().count() > SERVER_NAME_MAX_LEN {
        return Err(AppError::BadRequest(format!(
            "Server name must be at most {} characters.",
            SERVER_NAME_MAX_LEN
        )));
    }

    Ok(name.to_string())
}

fn validate_plan(plan: &str) -> Result<ServerPlan, AppError> {
    ServerPlan::parse(plan).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Unknown plan '{}'. Expected 'free' or 'premium'.",
            plan.trim()
        ))
    })
}

/// Trims a value and maps blank strings to `None`.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
