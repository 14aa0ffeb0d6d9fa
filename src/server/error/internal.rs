use thiserror::Error;

/// Internal issues indicating unexpected behavior & possible bugs or misconfiguration.
///
/// All variants result in a 500 Internal Server Error with a generic message
/// returned to the client.
#[derive(Error, Debug)]
pub enum InternalError {
    /// Encrypting an API key for storage failed.
    #[error("Failed to encrypt API key: {0}")]
    Encryption(String),

    /// A stored API key could not be decrypted, usually because the encryption
    /// key changed since it was written.
    #[error("Failed to decrypt stored API key: {0}")]
    Decryption(String),

    /// bcrypt failed to hash or verify a password.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// Repeated random token or ID generation collided with existing rows.
    #[error("Failed to generate a unique {0} after {1} attempts")]
    IdentifierCollision(&'static str, u32),
}
