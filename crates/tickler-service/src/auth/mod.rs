//! Single-user authentication.
//!
//! - `password`: Argon2 hashing and verification
//! - `token`: session tokens derived from the configured credential
//! - `signin`: password check and request authentication

pub mod password;
pub mod signin;
pub mod token;

pub use signin::{authenticate, check_password, sign_in};
pub use token::{issue_token, verify_token};
