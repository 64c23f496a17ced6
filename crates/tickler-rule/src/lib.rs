//! Recurrence rules for scheduled tasks.
//!
//! A rule string such as `"m -1 1,7"` is parsed into a [`Rule`] and evaluated
//! against a reference date and the date the task last fired on, yielding the
//! next date the task is due. Dates travel as `YYYYMMDD` strings.

pub mod calendar;
pub mod error;
pub mod rule;

pub use error::{RuleError, RuleResult};
pub use rule::core::Rule;
pub use rule::evaluate::{MAX_MONTH_STEPS, next_date};
