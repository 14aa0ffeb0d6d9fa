//! Generation of public account and server identifiers.
//!
//! Identifiers look like `SRV-1718031234567-k3j9x0q2a`: a prefix, the creation time in
//! milliseconds and nine random lowercase alphanumeric characters.

use chrono::Utc;
use rand::Rng;

const SUFFIX_LEN: usize = 9;
const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

fn generate(prefix: &str) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.random_range(0..SUFFIX_CHARSET.len())] as char)
        .collect();

    format!("{}-{}-{}", prefix, Utc::now().timestamp_millis(), suffix)
}

pub fn generate_account_id() -> String {
    generate("ACC")
}

pub fn generate_server_id() -> String {
    generate("SRV")
}
