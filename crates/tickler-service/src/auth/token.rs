//! Session tokens.
//!
//! A token is the hex SHA-256 of a fixed context string and the configured credential,
//! so it is stable across restarts and changes whenever the credential changes.

use sha2::{Digest, Sha256};
use tickler_core::config::Credential;

const TOKEN_CONTEXT: &[u8] = b"tickler-session-token\0";

/// ## Summary
/// Derives the session token for a credential.
#[must_use]
pub fn issue_token(credential: Credential<'_>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(TOKEN_CONTEXT);
    hasher.update(credential.secret().as_bytes());
    hex::encode(hasher.finalize())
}

/// ## Summary
/// Checks a presented token against the one derived from `credential`.
#[must_use]
pub fn verify_token(credential: Credential<'_>, token: &str) -> bool {
    let expected = issue_token(credential);
    expected.len() == token.len()
        && expected
            .bytes()
            .zip(token.bytes())
            .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
            == 0
}
