//! Task table queries.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::AsyncSqliteConnection;
use crate::db::schema::scheduler;
use crate::model::task::{NewTask, Task};

use super::text_match::{LIKE_ESCAPE, contains_pattern};

/// ## Summary
/// Returns a query over all tasks in display order: by date, then by id.
#[must_use]
pub fn ordered() -> scheduler::BoxedQuery<'static, diesel::sqlite::Sqlite> {
    scheduler::table
        .order((scheduler::date.asc(), scheduler::id.asc()))
        .into_boxed()
}

fn not_found_if_untouched(rows: usize) -> QueryResult<()> {
    if rows == 0 {
        Err(diesel::result::Error::NotFound)
    } else {
        Ok(())
    }
}

/// ## Summary
/// Inserts a task and returns its new id.
///
/// ## Errors
/// Returns a database error if the insert fails.
pub async fn insert_task(conn: &mut AsyncSqliteConnection, task: &NewTask) -> QueryResult<i32> {
    diesel::insert_into(scheduler::table)
        .values(task)
        .returning(scheduler::id)
        .get_result(conn)
        .await
}

/// ## Summary
/// Loads a task by id, `None` if it does not exist.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn get_task(conn: &mut AsyncSqliteConnection, id: i32) -> QueryResult<Option<Task>> {
    scheduler::table
        .find(id)
        .select(Task::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Overwrites every column of an existing task.
///
/// ## Errors
/// Returns `NotFound` if no task has this id, or a database error.
pub async fn update_task(
    conn: &mut AsyncSqliteConnection,
    id: i32,
    task: &NewTask,
) -> QueryResult<()> {
    let rows = diesel::update(scheduler::table.find(id))
        .set(task)
        .execute(conn)
        .await?;
    not_found_if_untouched(rows)
}

/// ## Summary
/// Moves a task to a new date.
///
/// ## Errors
/// Returns `NotFound` if no task has this id, or a database error.
pub async fn update_task_date(
    conn: &mut AsyncSqliteConnection,
    id: i32,
    date: &str,
) -> QueryResult<()> {
    let rows = diesel::update(scheduler::table.find(id))
        .set(scheduler::date.eq(date))
        .execute(conn)
        .await?;
    not_found_if_untouched(rows)
}

/// ## Summary
/// Deletes a task.
///
/// ## Errors
/// Returns `NotFound` if no task has this id, or a database error.
pub async fn delete_task(conn: &mut AsyncSqliteConnection, id: i32) -> QueryResult<()> {
    let rows = diesel::delete(scheduler::table.find(id))
        .execute(conn)
        .await?;
    not_found_if_untouched(rows)
}

/// ## Summary
/// Lists up to `limit` tasks in display order.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_tasks(conn: &mut AsyncSqliteConnection, limit: i64) -> QueryResult<Vec<Task>> {
    ordered()
        .select(Task::as_select())
        .limit(limit)
        .load(conn)
        .await
}

/// ## Summary
/// Lists up to `limit` tasks whose title or comment contains `text`.
///
/// Wildcards in `text` match literally. Matching is case-insensitive for ASCII only,
/// as SQLite's `LIKE` is.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn search_tasks(
    conn: &mut AsyncSqliteConnection,
    text: &str,
    limit: i64,
) -> QueryResult<Vec<Task>> {
    let pattern = contains_pattern(text);

    ordered()
        .filter(
            scheduler::title
                .like(pattern.clone())
                .escape(LIKE_ESCAPE)
                .or(scheduler::comment.like(pattern).escape(LIKE_ESCAPE)),
        )
        .select(Task::as_select())
        .limit(limit)
        .load(conn)
        .await
}

/// ## Summary
/// Lists up to `limit` tasks scheduled on `date` (canonical `YYYYMMDD`).
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn tasks_on_date(
    conn: &mut AsyncSqliteConnection,
    date: &str,
    limit: i64,
) -> QueryResult<Vec<Task>> {
    ordered()
        .filter(scheduler::date.eq(date.to_string()))
        .select(Task::as_select())
        .limit(limit)
        .load(conn)
        .await
}
