//! Task operations over a database connection.

use chrono::NaiveDate;
use diesel_async::AsyncConnection;
use diesel_async::scoped_futures::ScopedFutureExt;
use tickler_db::db::connection::DbConnection;
use tickler_db::db::query::task as query;
use tickler_db::model::task::Task;

use crate::error::{ServiceError, ServiceResult};
use crate::task::draft::{TaskDraft, TaskId, prepare_new_task, prepare_task_update};
use crate::task::search::TaskFilter;

/// Outcome of marking a task done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// One-off task, removed.
    Deleted,
    /// Recurring task, moved to its next occurrence.
    Rescheduled { next: String },
}

fn not_found(id: TaskId) -> ServiceError {
    ServiceError::NotFound(format!("task {id}"))
}

fn or_not_found(id: TaskId) -> impl FnOnce(diesel::result::Error) -> ServiceError {
    move |err| match err {
        diesel::result::Error::NotFound => not_found(id),
        other => ServiceError::DieselError(other),
    }
}

/// ## Summary
/// Validates and stores a new task.
///
/// ## Errors
/// Returns `ValidationError` for bad fields and a database error if the insert fails.
#[tracing::instrument(skip(conn, draft))]
pub async fn create_task(
    conn: &mut DbConnection<'_>,
    draft: TaskDraft,
    today: NaiveDate,
) -> ServiceResult<TaskId> {
    let task = prepare_new_task(draft, today)?;
    let id = TaskId::from(query::insert_task(conn, &task).await?);

    tracing::info!(task_id = %id, date = %task.date, "Task created");
    Ok(id)
}

/// ## Summary
/// Loads one task.
///
/// ## Errors
/// Returns `NotFound` for an unknown id.
pub async fn get_task(conn: &mut DbConnection<'_>, id: TaskId) -> ServiceResult<Task> {
    query::get_task(conn, id.get())
        .await?
        .ok_or_else(|| not_found(id))
}

/// ## Summary
/// Replaces every field of an existing task and returns the stored result.
///
/// ## Errors
/// Returns `ValidationError` for bad fields and `NotFound` for an unknown id.
#[tracing::instrument(skip(conn, draft))]
pub async fn update_task(
    conn: &mut DbConnection<'_>,
    id: TaskId,
    draft: TaskDraft,
    today: NaiveDate,
) -> ServiceResult<Task> {
    let task = prepare_task_update(draft, today)?;
    query::update_task(conn, id.get(), &task)
        .await
        .map_err(or_not_found(id))?;

    tracing::info!(task_id = %id, "Task updated");
    Ok(Task {
        id: id.get(),
        date: task.date,
        title: task.title,
        comment: task.comment,
        repeat: task.repeat,
    })
}

/// ## Summary
/// Deletes a task.
///
/// ## Errors
/// Returns `NotFound` for an unknown id.
#[tracing::instrument(skip(conn))]
pub async fn delete_task(conn: &mut DbConnection<'_>, id: TaskId) -> ServiceResult<()> {
    query::delete_task(conn, id.get())
        .await
        .map_err(or_not_found(id))?;

    tracing::info!(task_id = %id, "Task deleted");
    Ok(())
}

/// ## Summary
/// Lists tasks matching the search box text, at most `limit` of them.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn list_tasks(
    conn: &mut DbConnection<'_>,
    search: &str,
    limit: u32,
) -> ServiceResult<Vec<Task>> {
    let limit = i64::from(limit);
    let tasks = match TaskFilter::parse(search) {
        TaskFilter::All => query::list_tasks(conn, limit).await?,
        TaskFilter::OnDate(date) => {
            let date = tickler_rule::calendar::format_date(date);
            query::tasks_on_date(conn, &date, limit).await?
        }
        TaskFilter::Text(text) => query::search_tasks(conn, &text, limit).await?,
    };

    tracing::debug!(count = tasks.len(), "Listed tasks");
    Ok(tasks)
}

/// ## Summary
/// Marks a task done: one-off tasks are deleted, recurring tasks move to the next
/// occurrence after `today`. Runs in one transaction.
///
/// ## Errors
/// Returns `NotFound` for an unknown id and a rule error if the stored rule no
/// longer yields a next date.
#[tracing::instrument(skip(conn))]
pub async fn complete_task(
    conn: &mut DbConnection<'_>,
    id: TaskId,
    today: NaiveDate,
) -> ServiceResult<Completion> {
    let completion = conn
        .transaction::<_, ServiceError, _>(move |tx| {
            async move {
                let task = query::get_task(tx, id.get())
                    .await?
                    .ok_or_else(|| not_found(id))?;

                if task.repeat.is_empty() {
                    query::delete_task(tx, id.get()).await?;
                    return Ok(Completion::Deleted);
                }

                let next = tickler_rule::next_date(today, &task.date, &task.repeat)?;
                query::update_task_date(tx, id.get(), &next).await?;
                Ok(Completion::Rescheduled { next })
            }
            .scope_boxed()
        })
        .await?;

    tracing::info!(task_id = %id, completion = ?completion, "Task completed");
    Ok(completion)
}
