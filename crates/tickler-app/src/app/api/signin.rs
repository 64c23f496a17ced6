use salvo::http::StatusCode;
use salvo::http::cookie::{Cookie, SameSite};
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};
use serde::{Deserialize, Serialize};
use tickler_core::constants::{SIGN_IN_ROUTE_COMPONENT, TOKEN_COOKIE};
use tickler_service::auth::sign_in;
use tickler_service::error::ServiceError;

use super::response::{ErrorResponse, parse_body, render_error};
use crate::config::get_config_from_depot;

/// ## Summary
/// Sign-in request payload
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub password: String,
}

/// ## Summary
/// Sign-in response payload
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub token: String,
}

/// ## Summary
/// POST /api/signin - Exchange the password for a session token
///
/// ## Side Effects
/// Sets the session cookie on success.
///
/// ## Errors
/// Returns HTTP 400 for a malformed body, HTTP 401 for a wrong password or when no
/// password is configured, HTTP 500 for a malformed password hash.
#[handler]
#[tracing::instrument(skip_all)]
async fn signin_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let signin_req: SignInRequest = match parse_body(req).await {
        Ok(r) => r,
        Err(e) => {
            render_error(res, &e);
            return;
        }
    };

    let config = match get_config_from_depot(depot) {
        Ok(cfg) => cfg,
        Err(e) => {
            render_error(res, &e);
            return;
        }
    };

    match sign_in(&config.auth, &signin_req.password) {
        Ok(token) => {
            tracing::info!("Client signed in");
            res.add_cookie(
                Cookie::build((TOKEN_COOKIE, token.clone()))
                    .path("/")
                    .same_site(SameSite::Strict)
                    .build(),
            );
            res.render(Json(SignInResponse { token }));
        }
        Err(ServiceError::NotAuthenticated) => {
            tracing::info!("Rejected sign-in attempt");
            res.status_code(StatusCode::UNAUTHORIZED);
            res.render(Json(ErrorResponse::new("Wrong password")));
        }
        Err(e) => render_error(res, &e.into()),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(SIGN_IN_ROUTE_COMPONENT).post(signin_handler)
}
