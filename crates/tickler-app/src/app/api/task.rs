use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};
use serde::Serialize;
use tickler_core::constants::{TASK_DONE_ROUTE_COMPONENT, TASK_ROUTE_COMPONENT};
use tickler_service::task::{self as service, TaskId};

use super::response::{EmptyResponse, TaskRequest, TaskResponse, parse_body, render_error};
use super::today;
use crate::db_handler::get_db_from_depot;
use crate::error::{AppError, AppResult};

/// ## Summary
/// Create response payload
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i32,
}

fn id_param(req: &Request) -> AppResult<TaskId> {
    req.query::<String>("id")
        .unwrap_or_default()
        .parse::<TaskId>()
        .map_err(AppError::from)
}

/// ## Summary
/// POST /api/task - Create a task
///
/// ## Errors
/// Returns HTTP 400 for a malformed body or invalid fields.
/// Returns HTTP 503 if no database connection is available.
#[handler]
#[tracing::instrument(skip_all)]
async fn create_task(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let body: TaskRequest = match parse_body(req).await {
        Ok(b) => b,
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

    match service::create_task(&mut conn, body.into_draft(), today()).await {
        Ok(id) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(CreatedResponse { id: id.get() }));
        }
        Err(e) => render_error(res, &e.into()),
    }
}

/// ## Summary
/// GET /api/task?id= - Fetch one task
///
/// ## Errors
/// Returns HTTP 400 for a malformed id and HTTP 404 for an unknown one.
#[handler]
#[tracing::instrument(skip_all)]
async fn get_task(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let id = match id_param(req) {
        Ok(id) => id,
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

    match service::get_task(&mut conn, id).await {
        Ok(task) => res.render(Json(TaskResponse::from(task))),
        Err(e) => render_error(res, &e.into()),
    }
}

/// ## Summary
/// PUT /api/task - Replace every field of a task; the id comes from the body
///
/// ## Errors
/// Returns HTTP 400 for a malformed body, id or field and HTTP 404 for an unknown id.
#[handler]
#[tracing::instrument(skip_all)]
async fn update_task(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let body: TaskRequest = match parse_body(req).await {
        Ok(b) => b,
        Err(e) => {
            render_error(res, &e);
            return;
        }
    };

    let id = match body.id_text().parse::<TaskId>() {
        Ok(id) => id,
        Err(e) => {
            render_error(res, &e.into());
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

    match service::update_task(&mut conn, id, body.into_draft(), today()).await {
        Ok(task) => res.render(Json(TaskResponse::from(task))),
        Err(e) => render_error(res, &e.into()),
    }
}

/// ## Summary
/// DELETE /api/task?id= - Delete a task
///
/// ## Errors
/// Returns HTTP 400 for a malformed id and HTTP 404 for an unknown one.
#[handler]
#[tracing::instrument(skip_all)]
async fn delete_task(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let id = match id_param(req) {
        Ok(id) => id,
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

    match service::delete_task(&mut conn, id).await {
        Ok(()) => res.render(Json(EmptyResponse {})),
        Err(e) => render_error(res, &e.into()),
    }
}

/// ## Summary
/// POST /api/task/done?id= - Mark a task done
///
/// ## Side Effects
/// Deletes a one-off task, or moves a recurring task to its next date.
///
/// ## Errors
/// Returns HTTP 400 for a malformed id or a stored rule that no longer fires, and
/// HTTP 404 for an unknown id.
#[handler]
#[tracing::instrument(skip_all)]
async fn complete_task(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let id = match id_param(req) {
        Ok(id) => id,
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

    match service::complete_task(&mut conn, id, today()).await {
        Ok(_completion) => res.render(Json(EmptyResponse {})),
        Err(e) => render_error(res, &e.into()),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(TASK_ROUTE_COMPONENT)
        .post(create_task)
        .get(get_task)
        .put(update_task)
        .delete(delete_task)
        .push(Router::with_path(TASK_DONE_ROUTE_COMPONENT).post(complete_task))
}
