mod healthcheck;
mod nextdate;
pub mod response;
mod signin;
mod task;
mod tasks;

use chrono::NaiveDate;
use salvo::Router;

use crate::middleware::auth::AuthMiddleware;

// Re-export route constants from core
pub use tickler_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, NEXT_DATE_ROUTE_PREFIX, SIGN_IN_ROUTE_PREFIX,
    TASK_DONE_ROUTE_PREFIX, TASK_ROUTE_PREFIX, TASKS_ROUTE_PREFIX,
};

/// Dates are calendar days in UTC.
fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// ## Summary
/// Constructs the `/api` router. Task routes require a session.
///
/// ## Errors
/// Returns an error if any child route handler fails to initialize.
pub fn routes() -> anyhow::Result<Router> {
    Ok(Router::with_path(API_ROUTE_COMPONENT)
        .push(healthcheck::routes())
        .push(nextdate::routes())
        .push(signin::routes())
        .push(
            Router::new()
                .hoop(AuthMiddleware)
                .push(task::routes())
                .push(tasks::routes()),
        ))
}
