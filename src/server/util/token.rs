//! Session token generation and hashing.

use rand::{distr::Alphanumeric, Rng};
use sha2::{Digest, Sha256};

/// Length of a session token; 62^48 possible values.
pub const SESSION_TOKEN_LEN: usize = 48;

/// Generates a random alphanumeric session token from the thread-local CSPRNG.
pub fn generate_session_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Hex encoded SHA-256 of a token, the form in which tokens are stored.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_alphanumeric_tokens_of_fixed_length() {
        let token = generate_session_token();

        assert_eq!(token.len(), SESSION_TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(token, generate_session_token());
    }

    #[test]
    fn hash_is_stable_hex() {
        let hash = hash_token("abc");

        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_token("abc"));
        assert_ne!(hash, hash_token("abd"));
    }
}
