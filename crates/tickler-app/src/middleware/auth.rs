use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request};
use tickler_core::constants::TOKEN_COOKIE;
use tickler_service::auth::authenticate;
use tracing::error;

use crate::app::api::response::ErrorResponse;
use crate::config::get_config_from_depot;

/// Middleware handler for authentication.
/// Use this as a hoop on routes that require a signed-in client.
pub struct AuthMiddleware;

fn session_token(req: &Request) -> Option<&str> {
    req.cookie(TOKEN_COOKIE)
        .map(salvo::http::cookie::Cookie::value)
        .filter(|token| !token.is_empty())
}

/// ## Summary
/// Checks the session cookie against the configured credential.
///
/// ## Errors
/// Renders HTTP 401 with an error body and stops the chain if the token is missing
/// or wrong. Renders HTTP 500 if the settings are not in the depot.
#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        tracing::trace!("Authenticating request");

        let config = match get_config_from_depot(depot) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!(error = ?e, "Failed to get config from depot");
                res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
                res.render(Json(ErrorResponse::new("Internal server error")));
                ctrl.skip_rest();
                return;
            }
        };

        if let Err(e) = authenticate(&config.auth, session_token(req)) {
            tracing::debug!(error = %e, "Request rejected");
            res.status_code(StatusCode::UNAUTHORIZED);
            res.render(Json(ErrorResponse::new("Authentication required")));
            ctrl.skip_rest();
        }
    }
}
