//! Encryption of upstream API keys at rest.
//!
//! Keys are sealed with AES-256-GCM under a key derived from `API_KEY_ENCRYPTION_KEY`
//! with SHA-256. A random 12-byte nonce is prepended to each ciphertext and the
//! result is base64 encoded for the `server.api_key_encrypted` TEXT column.

use aes_gcm::{aead::Aead, Aes256Gcm, KeyInit, Nonce};
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::server::error::internal::InternalError;

const NONCE_SIZE: usize = 12;
const TAG_SIZE: usize = 16;

/// Encrypts and decrypts upstream API keys.
///
/// Cloning is cheap; the derived key is 32 bytes.
#[derive(Clone)]
pub struct ApiKeyCipher {
    key: [u8; 32],
}

impl ApiKeyCipher {
    /// Derives the AES-256 key from a passphrase.
    ///
    /// # Arguments
    /// - `passphrase` - Value of `API_KEY_ENCRYPTION_KEY`
    pub fn new(passphrase: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(passphrase.as_bytes());

        let mut key = [0u8; 32];
        key.copy_from_slice(&hasher.finalize());

        Self { key }
    }

    /// Encrypts an API key for storage.
    ///
    /// # Returns
    /// - `Ok(String)` - base64 of `nonce || ciphertext || tag`
    /// - `Err(InternalError::Encryption)` - Cipher failure
    pub fn encrypt(&self, plaintext: &str) -> Result<String, InternalError> {
        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| InternalError::Encryption(e.to_string()))?;

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::rng().fill_bytes(&mut nonce_bytes);

        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
            .map_err(|e| InternalError::Encryption(e.to_string()))?;

        let mut combined = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        combined.extend_from_slice(&nonce_bytes);
        combined.extend_from_slice(&ciphertext);

        Ok(base64::engine::general_purpose::STANDARD.encode(&combined))
    }

    /// Decrypts a stored API key.
    ///
    /// # Returns
    /// - `Ok(String)` - The plaintext key
    /// - `Err(InternalError::Decryption)` - Malformed ciphertext or wrong encryption key
    pub fn decrypt(&self, encoded: &str) -> Result<String, InternalError> {
        let combined = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| InternalError::Decryption(e.to_string()))?;

        if combined.len() < NONCE_SIZE + TAG_SIZE {
            return Err(InternalError::Decryption("ciphertext too short".to_string()));
        }

        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| InternalError::Decryption(e.to_string()))?;

        let (nonce, ciphertext) = combined.split_at(NONCE_SIZE);
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|e| InternalError::Decryption(e.to_string()))?;

        String::from_utf8(plaintext).map_err(|e| InternalError::Decryption(e.to_string()))
    }
}

impl std::fmt::Debug for ApiKeyCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyCipher")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decrypts_what_it_encrypted() {
        let cipher = ApiKeyCipher::new("test-encryption-key");

        let sealed = cipher.encrypt("erlc-server-key").unwrap();

        assert_ne!(sealed, "erlc-server-key");
        assert_eq!(cipher.decrypt(&sealed).unwrap(), "erlc-server-key");
    }

    #[test]
    fn uses_fresh_nonce_per_encryption() {
        let cipher = ApiKeyCipher::new("test-encryption-key");

        let first = cipher.encrypt("same").unwrap();
        let second = cipher.encrypt("same").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn wrong_key_fails() {
        let sealed = ApiKeyCipher::new("correct").encrypt("secret").unwrap();

        let result = ApiKeyCipher::new("wrong").decrypt(&sealed);

        assert!(matches!(result, Err(InternalError::Decryption(_))));
    }

    #[test]
    fn rejects_truncated_ciphertext() {
        let cipher = ApiKeyCipher::new("key");

        assert!(cipher.decrypt("c2hvcnQ=").is_err());
        assert!(cipher.decrypt("not base64!").is_err());
    }

    #[test]
    fn debug_output_hides_key() {
        let cipher = ApiKeyCipher::new("key");

        assert!(format!("{:?}", cipher).contains("[REDACTED]"));
    }
}
