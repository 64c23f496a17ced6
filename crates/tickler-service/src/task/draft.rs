//! Validation and normalization of incoming task fields.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use tickler_core::constants::MAX_REPEAT_LEN;
use tickler_db::model::task::NewTask;
use tickler_rule::calendar::{format_date, parse_date};

use crate::error::{ServiceError, ServiceResult};

/// Task fields as submitted by a client, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

/// Positive task id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(i32);

impl TaskId {
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl FromStr for TaskId {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ServiceError::validation("task id is empty"));
        }
        s.parse::<i32>()
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
            .ok_or_else(|| ServiceError::validation(format!("invalid task id {s:?}")))
    }
}

impl From<i32> for TaskId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn check_title(title: &str) -> ServiceResult<()> {
    if title.trim().is_empty() {
        return Err(ServiceError::validation("title is empty"));
    }
    Ok(())
}

fn check_repeat(today: NaiveDate, date: &str, repeat: &str) -> ServiceResult<()> {
    if repeat.is_empty() {
        return Ok(());
    }
    if repeat.len() > MAX_REPEAT_LEN {
        return Err(ServiceError::validation(format!(
            "repeat rule is longer than {MAX_REPEAT_LEN} bytes"
        )));
    }
    tickler_rule::next_date(today, date, repeat)
        .map(|_next| ())
        .map_err(|err| ServiceError::validation(format!("invalid repeat rule: {err}")))
}

fn parse_draft_date(date: &str) -> ServiceResult<NaiveDate> {
    parse_date(date).map_err(|err| ServiceError::validation(err.to_string()))
}

fn into_new_task(draft: TaskDraft, date: String) -> NewTask {
    NewTask {
        date,
        title: draft.title,
        comment: draft.comment,
        repeat: draft.repeat,
    }
}

/// ## Summary
/// Validates a new task. A missing or past date becomes `today`.
///
/// ## Errors
/// Returns `ValidationError` for a malformed date, an empty title, or a repeat rule
/// that is too long or does not evaluate.
pub fn prepare_new_task(draft: TaskDraft, today: NaiveDate) -> ServiceResult<NewTask> {
    let date = if draft.date.is_empty() {
        today
    } else {
        parse_draft_date(&draft.date)?.max(today)
    };
    let date = format_date(date);

    check_title(&draft.title)?;
    check_repeat(today, &date, &draft.repeat)?;

    Ok(into_new_task(draft, date))
}

/// ## Summary
/// Validates a full replacement of an existing task. The date is required and kept
/// as given, even when it lies in the past.
///
/// ## Errors
/// Returns `ValidationError` for a missing or malformed date, an empty title, or a
/// repeat rule that is too long or does not evaluate.
pub fn prepare_task_update(draft: TaskDraft, today: NaiveDate) -> ServiceResult<NewTask> {
    if draft.date.is_empty() {
        return Err(ServiceError::validation("date is empty"));
    }
    let date = format_date(parse_draft_date(&draft.date)?);

    check_title(&draft.title)?;
    check_repeat(today, &date, &draft.repeat)?;

    Ok(into_new_task(draft, date))
}
