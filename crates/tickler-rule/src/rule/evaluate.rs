//! Next-occurrence evaluation.

use chrono::{Datelike, Days, NaiveDate};

use crate::calendar::{
    MAX_YEAR, add_one_year, first_of_next_month, format_date, iso_weekday, parse_date,
};
use crate::error::{RuleError, RuleResult};
use crate::rule::core::{DayInterval, MonthlyRule, Rule, WeekdaySet};

/// Month steps the monthly walk may take before giving up. Any satisfiable rule
/// fires within 8 years (a February 29th selector), far below this bound.
pub const MAX_MONTH_STEPS: u32 = 1000;

/// ## Summary
/// Computes the next date after `reference` on which a task that last fired on
/// `base` (a `YYYYMMDD` string) recurs under `rule`.
///
/// ## Errors
/// - `InvalidDate` if `base` is not a canonical date (checked first).
/// - `InvalidRule` if `rule` is empty or malformed.
/// - `Exhausted` if a monthly rule never matches (e.g. `m 31 2`).
/// - `OutOfRange` if the next occurrence is past 9999-12-31.
pub fn next_date(reference: NaiveDate, base: &str, rule: &str) -> RuleResult<String> {
    let base = parse_date(base)?;
    let rule: Rule = rule.parse()?;
    rule.next_after(reference, base).map(format_date)
}

impl Rule {
    /// ## Summary
    /// The first occurrence strictly after `reference`, counting from `base`.
    ///
    /// ## Errors
    /// Returns `Exhausted` or `OutOfRange` as described on [`next_date`].
    pub fn next_after(&self, reference: NaiveDate, base: NaiveDate) -> RuleResult<NaiveDate> {
        let next = match self {
            Self::Yearly => next_yearly(reference, base)?,
            Self::EveryNDays(interval) => next_every_n_days(reference, base, *interval)?,
            Self::Weekly(weekdays) => next_weekly(reference, weekdays)?,
            Self::Monthly(rule) => next_monthly(reference, base, rule)?,
        };

        if next.year() > MAX_YEAR {
            return Err(RuleError::OutOfRange);
        }
        Ok(next)
    }
}

/// Steps one year at a time from `base`. A February 29th base lands on March 1st
/// in a common year and keeps that day afterwards.
fn next_yearly(reference: NaiveDate, base: NaiveDate) -> RuleResult<NaiveDate> {
    let mut date = base;
    loop {
        date = add_one_year(date).ok_or(RuleError::OutOfRange)?;
        if date > reference {
            return Ok(date);
        }
    }
}

fn next_every_n_days(
    reference: NaiveDate,
    base: NaiveDate,
    interval: DayInterval,
) -> RuleResult<NaiveDate> {
    let step = i64::from(interval.get());
    let elapsed = (reference - base).num_days();
    let periods = if elapsed < 0 { 1 } else { elapsed / step + 1 };

    u64::try_from(periods * step)
        .ok()
        .and_then(|days| base.checked_add_days(Days::new(days)))
        .ok_or(RuleError::OutOfRange)
}

/// The nearest listed weekday after `reference`; `base` plays no part.
fn next_weekly(reference: NaiveDate, weekdays: &WeekdaySet) -> RuleResult<NaiveDate> {
    let today = iso_weekday(reference.weekday());

    let target = weekdays
        .iter()
        .map(|day| if day <= today { day + 7 } else { day })
        .min()
        .ok_or_else(|| RuleError::invalid_rule("weekly rule needs at least one weekday"))?;

    reference
        .checked_add_days(Days::new(u64::from(target - today)))
        .ok_or(RuleError::OutOfRange)
}

/// Walks month by month from the later of `base` and the day after `reference`.
fn next_monthly(
    reference: NaiveDate,
    base: NaiveDate,
    rule: &MonthlyRule,
) -> RuleResult<NaiveDate> {
    let mut cursor = if base > reference {
        base
    } else {
        reference.succ_opt().ok_or(RuleError::OutOfRange)?
    };

    for _ in 0..MAX_MONTH_STEPS {
        if rule.allows_month(cursor.month()) {
            let days = rule.resolved_days(cursor.month(), cursor.year());
            if let Some(&day) = days.range(cursor.day()..).next() {
                return cursor.with_day(day).ok_or(RuleError::OutOfRange);
            }
        }
        cursor = first_of_next_month(cursor).ok_or(RuleError::OutOfRange)?;
    }

    tracing::debug!(rule = %Rule::Monthly(rule.clone()), %reference, %base, "Monthly rule exhausted");
    Err(RuleError::Exhausted {
        steps: MAX_MONTH_STEPS,
    })
}
