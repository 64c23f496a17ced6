use tickler_core::config::{AuthConfig, Credential};

use crate::auth::password::verify_password;
use crate::auth::token::{issue_token, verify_token};
use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Checks a sign-in password against the configured credential.
///
/// ## Errors
/// Returns `NotAuthenticated` if no credential is configured or the password does
/// not match, and `InvalidConfiguration` if the configured hash is malformed.
pub fn check_password(auth: &AuthConfig, password: &str) -> ServiceResult<()> {
    match auth.credential() {
        None => {
            tracing::debug!("Sign-in attempted with authentication disabled");
            Err(ServiceError::NotAuthenticated)
        }
        Some(Credential::Plain(expected)) => {
            if expected == password {
                Ok(())
            } else {
                Err(ServiceError::NotAuthenticated)
            }
        }
        Some(Credential::Hash(hash)) => verify_password(password, hash),
    }
}

/// ## Summary
/// Checks the password and returns the session token.
///
/// ## Errors
/// See [`check_password`].
pub fn sign_in(auth: &AuthConfig, password: &str) -> ServiceResult<String> {
    check_password(auth, password)?;
    auth.credential()
        .map(issue_token)
        .ok_or(ServiceError::NotAuthenticated)
}

/// ## Summary
/// Authenticates a request by its session token. Every request passes when no
/// credential is configured.
///
/// ## Errors
/// Returns `NotAuthenticated` if a credential is configured and the token is missing
/// or wrong.
pub fn authenticate(auth: &AuthConfig, token: Option<&str>) -> ServiceResult<()> {
    let Some(credential) = auth.credential() else {
        return Ok(());
    };

    match token {
        Some(token) if verify_token(credential, token) => Ok(()),
        Some(_) => {
            tracing::debug!("Rejected request with a stale or forged token");
            Err(ServiceError::NotAuthenticated)
        }
        None => Err(ServiceError::NotAuthenticated),
    }
}
