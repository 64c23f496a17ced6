use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};
use serde::Serialize;
use tickler_core::constants::TASKS_ROUTE_COMPONENT;
use tickler_service::task as service;

use super::response::{TaskResponse, render_error};
use crate::config::get_config_from_depot;
use crate::db_handler::get_db_from_depot;

/// ## Summary
/// Task list payload; `tasks` is `[]` rather than `null` when nothing matches.
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskResponse>,
}

/// ## Summary
/// GET /api/tasks?search= - List upcoming tasks, optionally filtered
///
/// The search text is either a `DD.MM.YYYY` date or a substring of the title or
/// comment. At most `tasks.list_limit` tasks are returned.
///
/// ## Errors
/// Returns HTTP 503 if no database connection is available.
#[handler]
#[tracing::instrument(skip_all)]
async fn list_tasks(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let search = req.query::<String>("search").unwrap_or_default();

    let config = match get_config_from_depot(depot) {
        Ok(cfg) => cfg,
        Err(e) => {
            render_error(res, &e);
            return;
        }
    };

    let provider = match get_db_from_depot(depot) {
        Ok(p) => p,
        Err(e) => {
            render_error(res, &e);
            return;
        }
    };

    let mut conn = match provider.get_connection().await {
        Ok(c) => c,
        Err(e) => {
            render_error(res, &e.into());
            return;
        }
    };

    match service::list_tasks(&mut conn, search.trim(), config.tasks.list_limit).await {
        Ok(tasks) => res.render(Json(TaskListResponse {
            tasks: tasks.into_iter().map(TaskResponse::from).collect(),
        })),
        Err(e) => render_error(res, &e.into()),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(TASKS_ROUTE_COMPONENT).get(list_tasks)
}
