//! bcrypt password hashing.
//!
//! Hashing is CPU bound, so both operations run on the blocking thread pool.

use crate::server::error::internal::InternalError;

const BCRYPT_COST: u32 = 10;

/// Hashes a password with bcrypt.
///
/// # Returns
/// - `Ok(String)` - Modular crypt formatted hash
/// - `Err(InternalError::PasswordHash)` - bcrypt or task failure
pub async fn hash_password(password: &str) -> Result<String, InternalError> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| InternalError::PasswordHash(e.to_string()))?
        .map_err(|e| InternalError::PasswordHash(e.to_string()))
}

/// Checks a password against a stored bcrypt hash.
///
/// A malformed stored hash counts as a mismatch rather than an error, so a
/// corrupted row cannot be used to distinguish accounts.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, InternalError> {
    let password = password.to_string();
    let hash = hash.to_string();

    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| InternalError::PasswordHash(e.to_string()))?;

    match verified {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::warn!("Stored password hash could not be parsed: {}", e);
            Ok(false)
        }
    }
}
