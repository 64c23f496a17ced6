//! JSON bodies shared by the API handlers.

use salvo::writing::Json;
use salvo::{Request, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tickler_db::model::task::Task;
use tickler_service::task::TaskDraft;
use tracing::error;

use crate::error::{AppError, AppResult};

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Body of successful operations that return nothing.
#[derive(Debug, Serialize)]
pub struct EmptyResponse {}

/// A task as the web client sees it. The id travels as a string.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskResponse {
    pub id: String,
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.to_string(),
            date: task.date,
            title: task.title,
            comment: task.comment,
            repeat: task.repeat,
        }
    }
}

/// Task fields accepted on create and update. Absent fields are empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TaskRequest {
    /// Only read on update. Accepts `"7"` as well as `7`.
    pub id: Option<serde_json::Value>,
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

impl TaskRequest {
    /// ## Summary
    /// Returns the id as text, empty when absent.
    #[must_use]
    pub fn id_text(&self) -> String {
        match &self.id {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(serde_json::Value::String(id)) => id.clone(),
            Some(other) => other.to_string(),
        }
    }

    #[must_use]
    pub fn into_draft(self) -> TaskDraft {
        TaskDraft {
            date: self.date,
            title: self.title,
            comment: self.comment,
            repeat: self.repeat,
        }
    }
}

/// ## Summary
/// Reads the request body as JSON, whatever content type the client declared.
///
/// ## Errors
/// Returns `BadRequest` if the body cannot be read or is not the expected JSON.
pub async fn parse_body<T: DeserializeOwned>(req: &mut Request) -> AppResult<T> {
    let payload = req
        .payload()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?;
    serde_json::from_slice(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))
}

/// ## Summary
/// Renders `err` as `{"error": ...}` with its status code. Server-side failures are
/// logged with their full detail.
pub fn render_error(res: &mut Response, err: &AppError) {
    let status = err.status_code();
    if status.is_server_error() {
        error!(error = ?err, status = %status, "Request failed");
    } else {
        tracing::debug!(error = %err, status = %status, "Request rejected");
    }

    res.status_code(status);
    res.render(Json(ErrorResponse::new(err.public_message())));
}
