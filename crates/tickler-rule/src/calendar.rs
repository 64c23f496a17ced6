//! Calendar arithmetic shared by the rule evaluator.

use std::cmp::Ordering;

use chrono::{Datelike, Months, NaiveDate, Weekday};

use crate::error::{RuleError, RuleResult};

/// Last year representable in the canonical date format.
pub const MAX_YEAR: i32 = 9999;

/// Parses a canonical date (`YYYYMMDD`, exactly 8 ASCII digits).
///
/// ## Errors
/// Returns `InvalidDate` if the string has the wrong shape or names a day that
/// does not exist (e.g. `20230229`).
pub fn parse_date(s: &str) -> RuleResult<NaiveDate> {
    let invalid = || RuleError::InvalidDate(s.to_string());

    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let year = s[0..4].parse::<i32>().map_err(|_err| invalid())?;
    let month = s[4..6].parse::<u32>().map_err(|_err| invalid())?;
    let day = s[6..8].parse::<u32>().map_err(|_err| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Formats a date in the canonical `YYYYMMDD` form.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    format!("{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

/// Gregorian leap year: divisible by 4, except centuries not divisible by 400.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`. Returns 0 for a month outside 1-12.
#[must_use]
pub const fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// ISO weekday number: Monday is 1, Sunday is 7.
#[must_use]
pub const fn iso_weekday(weekday: Weekday) -> u8 {
    match weekday {
        Weekday::Mon => 1,
        Weekday::Tue => 2,
        Weekday::Wed => 3,
        Weekday::Thu => 4,
        Weekday::Fri => 5,
        Weekday::Sat => 6,
        Weekday::Sun => 7,
    }
}

/// Resolves a day-of-month selector against a month with `days_in_month` days.
///
/// Positive selectors name the day directly and resolve to `None` when the month is
/// too short. Negative selectors count back from the end: `-1` is the last day.
#[must_use]
pub fn resolve_day_selector(selector: i8, days_in_month: u32) -> Option<u32> {
    let magnitude = u32::from(selector.unsigned_abs());
    match selector.cmp(&0) {
        Ordering::Greater => (magnitude <= days_in_month).then_some(magnitude),
        Ordering::Less => (magnitude <= days_in_month).then(|| days_in_month - magnitude + 1),
        Ordering::Equal => None,
    }
}

/// The first day of the month after `date`'s month.
#[must_use]
pub fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)?.checked_add_months(Months::new(1))
}

/// The same month and day one year later. February 29th becomes March 1st when
/// the next year is a common year.
#[must_use]
pub fn add_one_year(date: NaiveDate) -> Option<NaiveDate> {
    let year = date.year().checked_add(1)?;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}
